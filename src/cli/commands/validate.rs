//! `buildcrew validate` command - Validate request files against the schema

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::loader::collect_request_files;
use crate::entities::RequestDocument;
use crate::schema::validator::ValidateFileError;
use crate::schema::Validator;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Request files or directories (default: current directory)
    #[arg()]
    pub paths: Vec<PathBuf>,

    /// Continue validation after first error
    #[arg(long)]
    pub keep_going: bool,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    total_errors: usize,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };
    let files = collect_request_files(&paths)?;
    let validator = Validator::default();

    let mut stats = ValidationStats::default();
    let show_files = !args.summary && !global.quiet;

    if !global.quiet {
        println!(
            "{} Validating {} file(s)...\n",
            style("→").blue(),
            files.len()
        );
    }

    for path in &files {
        stats.files_checked += 1;

        let result = validator.validate_file(path).and_then(|_| {
            // Schema-valid files must also deserialize into a request
            RequestDocument::load(path)
                .map(|_| ())
                .map_err(ValidateFileError::from)
        });

        match result {
            Ok(()) => {
                stats.files_passed += 1;
                if show_files {
                    println!("{} {}", style("✓").green(), path.display());
                }
            }
            Err(e) => {
                stats.files_failed += 1;
                let errors = match &e {
                    ValidateFileError::Invalid(v) => v.violation_count(),
                    ValidateFileError::Io { .. } | ValidateFileError::Load(_) => 1,
                };
                stats.total_errors += errors;

                if show_files {
                    println!(
                        "{} {} - {} error(s)",
                        style("✗").red(),
                        path.display(),
                        errors
                    );
                    println!("{:?}", miette::Report::new(e));
                }

                if !args.keep_going {
                    break;
                }
            }
        }
    }

    if !global.quiet {
        print_summary(&stats);
    }

    match stats.files_failed {
        0 => {
            if !global.quiet {
                println!(
                    "{} All files passed validation!",
                    style("✓").green().bold()
                );
            }
            Ok(())
        }
        1 => Err(miette::miette!("Validation failed: 1 file has errors")),
        n => Err(miette::miette!("Validation failed: {} files have errors", n)),
    }
}

fn print_summary(stats: &ValidationStats) {
    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Files checked:  {}", style(stats.files_checked).cyan());
    println!("  Files passed:   {}", style(stats.files_passed).green());
    println!("  Files failed:   {}", style(stats.files_failed).red());
    println!("  Total errors:   {}", style(stats.total_errors).red());
    println!();
}
