//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, crew::CrewArgs,
    duration::DurationArgs, new::NewArgs, profile::ProfileArgs, run::RunArgs,
    validate::ValidateArgs,
};
use crate::core::units::LinearUnit;
use crate::engine::Profile;

#[derive(Parser)]
#[command(name = "buildcrew")]
#[command(author, version, about = "Construction work duration and crew estimator")]
#[command(long_about = "Estimates how many days a crew needs for a construction work item, \
or the crew needed to finish it in a given number of days, from measured geometry and \
schedule risk factors.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Productivity profile: three-role or two-role (default: from config)
    #[arg(long, short = 'p', global = true)]
    pub profile: Option<Profile>,

    /// Linear unit used to label measurements (default: from config)
    #[arg(long, short = 'u', global = true)]
    pub unit: Option<LinearUnit>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the duration of a work item from its crew
    #[command(visible_alias = "dur")]
    Duration(DurationArgs),

    /// Estimate the crew needed to finish a work item in a given number of days
    Crew(CrewArgs),

    /// Run estimates for request files or directories of them
    Run(RunArgs),

    /// Create a new request file
    New(NewArgs),

    /// Validate request files against the request schema
    Validate(ValidateArgs),

    /// Show the productivity table of a profile
    Profile(ProfileArgs),

    /// View and change configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled summary for terminals
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}
