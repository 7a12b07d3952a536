//! Shared helper functions for CLI commands

use clap::ValueEnum;
use tracing::warn;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::units::LinearUnit;
use crate::core::Config;
use crate::engine::Profile;

/// Settings for one invocation: config merged with global flags
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub profile: Profile,
    pub unit: LinearUnit,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Settings {
    /// Resolve settings; command-line flags win over config
    pub fn resolve(global: &GlobalOpts) -> Self {
        Self::from_config(Config::load(), global)
    }

    pub fn from_config(config: Config, global: &GlobalOpts) -> Self {
        let profile = global.profile.unwrap_or_else(|| config.profile());
        let unit = global.unit.unwrap_or_else(|| config.unit());

        let mut format = global.format;
        if format == OutputFormat::Auto {
            if let Some(name) = &config.default_format {
                match <OutputFormat as ValueEnum>::from_str(name, true) {
                    Ok(f) => format = f,
                    Err(_) => warn!(default_format = %name, "Unknown default_format in config"),
                }
            }
        }

        Self {
            config,
            profile,
            unit,
            format,
            quiet: global.quiet,
        }
    }
}

/// Format a measured value without trailing zeros ("2", "2.5", "0.125")
pub fn format_number(value: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, value);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// "1 day", "3 days"
pub fn format_days(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}
