//! Estimate output in every supported format

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_days, format_number};
use crate::cli::OutputFormat;
use crate::core::work::Role;
use crate::engine::Mode;
use crate::entities::Estimate;

const HEADERS: [&str; 12] = [
    "name",
    "work_type",
    "sub_variant",
    "mode",
    "quantity",
    "unit",
    "delay_days",
    "duration_days",
    "special",
    "special2",
    "labor",
    "expected_completion",
];

/// Print estimates to stdout
pub fn print_estimates(estimates: &[Estimate], format: OutputFormat) -> Result<()> {
    print!("{}", render(estimates, format)?);
    Ok(())
}

/// Render estimates in the requested format
pub fn render(estimates: &[Estimate], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Auto => Ok(estimates
            .iter()
            .map(render_summary)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Yaml => match estimates {
            [single] => serde_yml::to_string(single).into_diagnostic(),
            _ => serde_yml::to_string(estimates).into_diagnostic(),
        },
        OutputFormat::Json => {
            let json = match estimates {
                [single] => serde_json::to_string_pretty(single),
                _ => serde_json::to_string_pretty(estimates),
            }
            .into_diagnostic()?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Tsv => {
            let mut out = HEADERS.join("\t");
            out.push('\n');
            for row in estimates.iter().map(row) {
                out.push_str(&row.join("\t"));
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(HEADERS).into_diagnostic()?;
            for estimate in estimates {
                writer.write_record(row(estimate)).into_diagnostic()?;
            }
            let bytes = writer.into_inner().into_diagnostic()?;
            String::from_utf8(bytes).into_diagnostic()
        }
        OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(HEADERS);
            for estimate in estimates {
                builder.push_record(row(estimate));
            }
            Ok(format!("{}\n", builder.build().with(Style::markdown())))
        }
    }
}

/// One flat record per estimate
fn row(estimate: &Estimate) -> [String; 12] {
    [
        estimate.name(),
        estimate.work_type.to_string(),
        estimate
            .sub_variant
            .map(|s| s.to_string())
            .unwrap_or_default(),
        estimate.mode.to_string(),
        format_number(estimate.quantity, 3),
        estimate.quantity_unit.clone(),
        estimate.delay_days.to_string(),
        estimate.duration_days.to_string(),
        estimate.headcount(Role::Special).to_string(),
        estimate.headcount(Role::Special2).to_string(),
        estimate.headcount(Role::Labor).to_string(),
        estimate
            .expected_completion
            .map(|d| d.to_string())
            .unwrap_or_default(),
    ]
}

/// Styled multi-line summary for terminals
fn render_summary(estimate: &Estimate) -> String {
    let mut out = String::new();

    let mut heading = estimate.work_name.clone();
    if let Some(sub) = estimate.sub_variant {
        heading.push_str(&format!(" · {}", sub.display_name()));
    }
    out.push_str(&format!("{} {}", style("◆").cyan(), style(heading).bold()));
    if let Some(title) = &estimate.title {
        out.push_str(&format!("  {}", style(title).dim()));
    }
    if let Some(source) = &estimate.source {
        out.push_str(&format!("  {}", style(source.display()).dim()));
    }
    out.push('\n');

    let field = |out: &mut String, name: &str, value: String| {
        out.push_str(&format!("  {:<12} {}\n", style(name).dim(), value));
    };

    if let Some(project_type) = &estimate.project_type {
        field(&mut out, "Project", project_type.clone());
    }
    field(&mut out, "Profile", estimate.profile.to_string());
    field(
        &mut out,
        "Quantity",
        format!("{} {}", format_number(estimate.quantity, 3), estimate.quantity_unit),
    );
    if let Some(width) = estimate.chb_width {
        field(&mut out, "CHB width", format!("{} in", format_number(width, 2)));
    }

    let risks = if estimate.risks.is_empty() {
        style("none").dim().to_string()
    } else {
        estimate
            .risks
            .iter()
            .map(|r| format!("{} (+{})", r.label(), r.weight()))
            .collect::<Vec<_>>()
            .join(", ")
    };
    field(&mut out, "Risks", risks);
    field(&mut out, "Delay", format_days(estimate.delay_days));

    match estimate.mode {
        Mode::SolveDuration => {
            for line in &estimate.crew {
                field(
                    &mut out,
                    &line.label,
                    format!(
                        "{} → {} days",
                        line.headcount,
                        format_number(line.days.unwrap_or_default(), 2)
                    ),
                );
            }
            field(
                &mut out,
                "Duration",
                style(format_days(estimate.duration_days)).green().bold().to_string(),
            );
        }
        Mode::SolveCrew => {
            field(&mut out, "Target", format_days(estimate.duration_days));
            let crew = estimate
                .crew
                .iter()
                .map(|l| format!("{} {}", l.label, l.headcount))
                .collect::<Vec<_>>()
                .join(", ");
            field(
                &mut out,
                "Crew",
                format!(
                    "{} ({} total)",
                    style(crew).green().bold(),
                    estimate.total_crew
                ),
            );
        }
    }

    if let Some(start) = estimate.start_date {
        field(&mut out, "Start", start.to_string());
    }
    if let Some(done) = estimate.expected_completion {
        field(&mut out, "Completion", done.to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::LinearUnit;
    use crate::engine::{EstimationRequest, Estimator, Geometry, Profile, RoleHeadcounts};
    use crate::entities::RequestDocument;

    fn steel() -> Estimate {
        let request = EstimationRequest::duration(
            Geometry::Steel { rebar_mass: 1000.0 },
            RoleHeadcounts::new(1, 1, 1),
        );
        let outcome = Estimator::default().estimate(&request).unwrap();
        let doc = RequestDocument::from_request(&request, LinearUnit::M);
        Estimate::new(&doc, Profile::ThreeRole, &outcome).with_source("rebar.request.yaml")
    }

    #[test]
    fn test_tsv_has_header_and_row() {
        let out = render(&[steel()], OutputFormat::Tsv).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("name\twork_type"));
        assert_eq!(
            lines[1],
            "rebar\tsteel\t\tsolve-duration\t1000\tkg\t0\t6\t1\t1\t1\t"
        );
    }

    #[test]
    fn test_csv_rows() {
        let out = render(&[steel(), steel()], OutputFormat::Csv).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.lines().nth(1).unwrap().starts_with("rebar,steel,,solve-duration,1000,kg"));
    }

    #[test]
    fn test_json_single_is_object() {
        let out = render(&[steel()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["duration_days"], 6);
        assert_eq!(value["work_type"], "steel");
        assert_eq!(value["mode"], "solve-duration");
    }

    #[test]
    fn test_yaml_many_is_list() {
        let out = render(&[steel(), steel()], OutputFormat::Yaml).unwrap();
        let value: serde_yml::Value = serde_yml::from_str(&out).unwrap();
        assert_eq!(value.as_sequence().map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_markdown_table() {
        let out = render(&[steel()], OutputFormat::Md).unwrap();
        assert!(out.contains("| name"));
        assert!(out.contains("| rebar"));
    }

    #[test]
    fn test_summary_mentions_duration() {
        let out = render(&[steel()], OutputFormat::Auto).unwrap();
        assert!(out.contains("Steel Works"));
        assert!(out.contains("6 days"));
    }
}
