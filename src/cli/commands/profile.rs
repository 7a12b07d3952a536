//! `buildcrew profile` command - Show a productivity table

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_number, Settings};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::units::UnitSystem;
use crate::core::work::Role;
use crate::engine::delay::max_delay_days;
use crate::engine::{ProductivityTable, RiskFactor};

#[derive(clap::Args, Debug)]
pub struct ProfileArgs {
    /// Also list the risk flags and their delay weights
    #[arg(long)]
    pub risks: bool,
}

/// One table row as written in machine-readable formats
#[derive(Debug, Serialize)]
struct ProfileRow {
    work_type: String,
    bucket: String,
    unit: String,
    special: Option<f64>,
    special2: Option<f64>,
    labor: f64,
}

pub fn run(args: ProfileArgs, global: &GlobalOpts) -> Result<()> {
    let settings = Settings::resolve(global);
    let table = ProductivityTable::for_profile(settings.profile);

    let rows: Vec<ProfileRow> = table
        .rows()
        .iter()
        .map(|r| ProfileRow {
            work_type: r.work_type.to_string(),
            bucket: r.bucket.to_string(),
            unit: format!(
                "{}/day",
                UnitSystem::new(settings.unit, r.work_type).quantity_label()
            ),
            special: r.coefficients.get(Role::Special),
            special2: r.coefficients.get(Role::Special2),
            labor: r.coefficients.labor,
        })
        .collect();

    match settings.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&rows).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for row in &rows {
                writer.serialize(row).into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
        OutputFormat::Tsv => {
            println!("work_type\tbucket\tunit\tspecial\tspecial2\tlabor");
            for row in &rows {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    row.work_type,
                    row.bucket,
                    row.unit,
                    cell(row.special),
                    cell(row.special2),
                    format_number(row.labor, 4)
                );
            }
        }
        OutputFormat::Auto | OutputFormat::Md => {
            if !settings.quiet && settings.format == OutputFormat::Auto {
                println!(
                    "{} Productivity profile {}",
                    style("◆").cyan(),
                    style(settings.profile).bold()
                );
                println!();
            }

            let mut builder = Builder::default();
            builder.push_record(["Work type", "Bucket", "Unit", "Special", "Special2", "Labor"]);
            for row in &rows {
                builder.push_record([
                    row.work_type.clone(),
                    row.bucket.clone(),
                    row.unit.clone(),
                    cell(row.special),
                    cell(row.special2),
                    format_number(row.labor, 4),
                ]);
            }
            println!("{}", builder.build().with(Style::markdown()));

            if args.risks {
                println!();
                let mut builder = Builder::default();
                builder.push_record(["Risk", "Delay (days)"]);
                for factor in RiskFactor::all() {
                    builder.push_record([factor.label().to_string(), factor.weight().to_string()]);
                }
                builder.push_record(["All risks".to_string(), max_delay_days().to_string()]);
                println!("{}", builder.build().with(Style::markdown()));
            }
        }
    }

    Ok(())
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| format_number(v, 4)).unwrap_or_else(|| "-".to_string())
}
