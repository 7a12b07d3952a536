//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::core::units::LinearUnit;
use crate::engine::Profile;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".buildcrew.yaml";

/// Keys accepted in config files, with descriptions
pub const CONFIG_KEYS: &[(&str, &str)] = &[
    ("profile", "Productivity profile: three-role or two-role"),
    ("unit", "Linear unit for geometry labels: m, mm, cm, in, ft"),
    ("default_format", "Default output format (auto, yaml, json, tsv, csv, md)"),
    ("project_type", "Project label written into new requests, e.g. Bungalow"),
];

/// buildcrew configuration with layered hierarchy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Productivity profile used for every estimate of a run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    /// Linear unit used to label quantities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<LinearUnit>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Default project label for new requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(&cwd)
    }

    /// Load configuration as seen from `dir`
    pub fn load_from(dir: &Path) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/buildcrew/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Nearest .buildcrew.yaml at or above `dir`
        if let Some(local_path) = Self::find_local_config(dir) {
            if let Some(local) = Self::read_file(&local_path) {
                config.merge(local);
            }
        }

        // 4. Environment variables
        if let Ok(profile) = std::env::var("BUILDCREW_PROFILE") {
            match profile.parse() {
                Ok(p) => config.profile = Some(p),
                Err(e) => warn!(error = %e, "Ignoring BUILDCREW_PROFILE"),
            }
        }
        if let Ok(unit) = std::env::var("BUILDCREW_UNIT") {
            match unit.parse() {
                Ok(u) => config.unit = Some(u),
                Err(e) => warn!(error = %e, "Ignoring BUILDCREW_UNIT"),
            }
        }

        config
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "buildcrew")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Walk up from `dir` looking for a local config file
    pub fn find_local_config(dir: &Path) -> Option<PathBuf> {
        dir.ancestors()
            .map(|d| d.join(LOCAL_CONFIG_FILE))
            .find(|p| p.is_file())
    }

    /// Parse one config file; unreadable or malformed files are skipped
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| warn!(path = %path.display(), error = %e, "Could not read config file"))
            .ok()?;
        if contents.trim().is_empty() {
            return Some(Config::default());
        }
        serde_yml::from_str::<Config>(&contents)
            .map_err(|e| warn!(path = %path.display(), error = %e, "Ignoring malformed config file"))
            .ok()
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.profile.is_some() {
            self.profile = other.profile;
        }
        if other.unit.is_some() {
            self.unit = other.unit;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.project_type.is_some() {
            self.project_type = other.project_type;
        }
    }

    pub fn profile(&self) -> Profile {
        self.profile.unwrap_or_default()
    }

    pub fn unit(&self) -> LinearUnit {
        self.unit.unwrap_or_default()
    }

    /// Value of a config key as text, if set
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "profile" => self.profile.map(|p| p.to_string()),
            "unit" => self.unit.map(|u| u.to_string()),
            "default_format" => self.default_format.clone(),
            "project_type" => self.project_type.clone(),
            _ => None,
        }
    }
}
