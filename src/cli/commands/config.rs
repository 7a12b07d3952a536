//! `buildcrew config` command - Configuration management
//!
//! Provides commands to view and modify buildcrew configuration.

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::{CONFIG_KEYS, LOCAL_CONFIG_FILE};
use crate::core::units::LinearUnit;
use crate::core::Config;
use crate::engine::Profile;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path(PathArgs),

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., profile, unit)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of the local .buildcrew.yaml
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of the local .buildcrew.yaml
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct PathArgs {
    /// Show only the local config path
    #[arg(long = "local-only", conflicts_with = "global_only")]
    pub local_only: bool,

    /// Show only the global config path
    #[arg(long = "global-only")]
    pub global_only: bool,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, _global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Set(args) => run_set(args),
        ConfigCommands::Unset(args) => run_unset(args),
        ConfigCommands::Path(args) => run_path(args),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        check_key(key)?;
        return match config.get(key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();

    for (key, _) in CONFIG_KEYS {
        let value = config.get(key);
        match value {
            Some(v) => println!("  {}: {}", style(key).cyan(), style(v).yellow()),
            None => println!("  {}: {}", style(key).cyan(), style("(not set)").dim()),
        }
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Command-line flags (--profile, --unit, --format)");
    println!("  2. Environment variables (BUILDCREW_PROFILE, BUILDCREW_UNIT)");
    println!("  3. Local config ({})", LOCAL_CONFIG_FILE);
    println!("  4. Global config (~/.config/buildcrew/config.yaml)");

    Ok(())
}

fn run_set(args: SetArgs) -> Result<()> {
    check_key(&args.key)?;
    check_value(&args.key, &args.value)?;

    let config_path = target_path(args.global)?;
    let mut config_map = read_mapping(&config_path)?;

    config_map.insert(
        serde_yml::Value::String(args.key.clone()),
        serde_yml::Value::String(args.value.clone()),
    );

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    println!(
        "{} Set {} {} {} in {}",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(&args.value).yellow(),
        config_path.display()
    );

    Ok(())
}

fn run_unset(args: UnsetArgs) -> Result<()> {
    check_key(&args.key)?;

    let config_path = target_path(args.global)?;
    if !config_path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            config_path.display()
        ));
    }

    let mut config_map = read_mapping(&config_path)?;
    if config_map
        .remove(serde_yml::Value::String(args.key.clone()))
        .is_none()
    {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    println!(
        "{} Removed {} from {}",
        style("✓").green(),
        style(&args.key).cyan(),
        config_path.display()
    );

    Ok(())
}

fn run_path(args: PathArgs) -> Result<()> {
    let global_path = global_path()?;
    let local_path = local_path()?;

    if args.global_only {
        println!("{}", global_path.display());
        return Ok(());
    }
    if args.local_only {
        println!("{}", local_path.display());
        return Ok(());
    }

    println!("{}", style("Configuration file paths:").bold());
    println!();
    print_path("Global:", &global_path);
    println!();
    print_path("Local:", &local_path);

    Ok(())
}

fn print_path(label: &str, path: &Path) {
    println!("  {} {}", style(label).cyan(), path.display());
    if path.exists() {
        println!("          {}", style("(exists)").green());
    } else {
        println!("          {}", style("(not created)").dim());
    }
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in CONFIG_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'buildcrew config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

// Helper functions

fn check_key(key: &str) -> Result<()> {
    if CONFIG_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        let known = CONFIG_KEYS
            .iter()
            .map(|(k, _)| *k)
            .collect::<Vec<_>>()
            .join(", ");
        Err(miette::miette!(
            help = format!("Known keys: {}", known),
            "Unknown configuration key '{}'",
            key
        ))
    }
}

fn check_value(key: &str, value: &str) -> Result<()> {
    match key {
        "profile" => value.parse::<Profile>().map(|_| ()).into_diagnostic(),
        "unit" => value.parse::<LinearUnit>().map(|_| ()).into_diagnostic(),
        "default_format" => <OutputFormat as ValueEnum>::from_str(value, true)
            .map(|_| ())
            .map_err(|e| miette::miette!("Invalid default_format '{}': {}", value, e)),
        _ => Ok(()),
    }
}

fn global_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))
}

/// Nearest existing local config, or a new one in the current directory
fn local_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    Ok(Config::find_local_config(&cwd).unwrap_or_else(|| cwd.join(LOCAL_CONFIG_FILE)))
}

fn target_path(global: bool) -> Result<PathBuf> {
    if global {
        global_path()
    } else {
        local_path()
    }
}

fn read_mapping(path: &Path) -> Result<serde_yml::Mapping> {
    if !path.exists() {
        return Ok(serde_yml::Mapping::new());
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    match serde_yml::from_str::<serde_yml::Value>(&content).into_diagnostic()? {
        serde_yml::Value::Mapping(map) => Ok(map),
        serde_yml::Value::Null => Ok(serde_yml::Mapping::new()),
        _ => Err(miette::miette!(
            "Config file is not a mapping: {}",
            path.display()
        )),
    }
}
