//! `buildcrew run` command - Estimate every request file under the given paths

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::commands::utils::estimate_document;
use crate::cli::helpers::Settings;
use crate::cli::output::print_estimates;
use crate::cli::GlobalOpts;
use crate::core::loader::collect_request_files;
use crate::entities::{Estimate, RequestDocument};
use crate::schema::Validator;

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Request files or directories containing *.request.yaml files
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Continue with the remaining files after a failure
    #[arg(long)]
    pub keep_going: bool,
}

pub fn run(args: RunArgs, global: &GlobalOpts) -> Result<()> {
    let settings = Settings::resolve(global);
    let files = collect_request_files(&args.paths)?;

    if files.is_empty() {
        return Err(miette::miette!(
            "No request files found (looking for *.request.yaml)"
        ));
    }

    info!(files = files.len(), profile = %settings.profile, "Running requests");

    let validator = Validator::default();
    let mut estimates = Vec::new();
    let mut failed = 0usize;

    for path in &files {
        match estimate_file(path, &validator, &settings) {
            Ok(estimate) => estimates.push(estimate),
            Err(report) if args.keep_going => {
                failed += 1;
                eprintln!("{} {}", style("✗").red(), path.display());
                eprintln!("{:?}", report);
            }
            Err(report) => {
                if !estimates.is_empty() {
                    print_estimates(&estimates, settings.format)?;
                }
                return Err(report);
            }
        }
    }

    print_estimates(&estimates, settings.format)?;

    match failed {
        0 => Ok(()),
        1 => Err(miette::miette!(
            "1 of {} request files failed",
            files.len()
        )),
        n => Err(miette::miette!(
            "{} of {} request files failed",
            n,
            files.len()
        )),
    }
}

/// Validate, load, and estimate one request file
fn estimate_file(path: &Path, validator: &Validator, settings: &Settings) -> Result<Estimate> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .map_err(|e| e.wrap_err(format!("Could not read {}", path.display())))?;
    let filename = path.display().to_string();

    validator.validate(&content, &filename)?;
    let doc = RequestDocument::from_yaml(&content, &filename)?;
    let estimate = estimate_document(&doc, settings)?;

    Ok(estimate.with_source(path))
}
