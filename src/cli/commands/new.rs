//! `buildcrew new` command - Scaffold a request file

use chrono::NaiveDate;
use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::helpers::Settings;
use crate::cli::GlobalOpts;
use crate::core::loader::REQUEST_SUFFIX;
use crate::core::units::LinearUnit;
use crate::core::work::{SubVariant, WorkType};
use crate::engine::Mode;
use crate::schema::{RequestWizard, TemplateContext, TemplateGenerator, WizardPreset};

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Work type (prompted for in interactive mode when omitted)
    #[arg(required_unless_present = "interactive")]
    pub work_type: Option<WorkType>,

    /// Sub-variant (e.g., footing, floor-slab, interior-wall, floor-tile)
    #[arg(long, short = 's')]
    pub sub_variant: Option<SubVariant>,

    /// Which side of the estimate the file asks for
    #[arg(long, short = 'm', value_enum)]
    pub mode: Option<SolveFor>,

    /// Title written into the file
    #[arg(long)]
    pub title: Option<String>,

    /// Start date written into the file (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Output file (default: <work-type>.request.yaml in the current directory)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Prompt for every field
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Mode names accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveFor {
    /// Known crew, estimate days
    Duration,
    /// Known days, estimate crew
    Crew,
}

impl From<SolveFor> for Mode {
    fn from(value: SolveFor) -> Self {
        match value {
            SolveFor::Duration => Mode::SolveDuration,
            SolveFor::Crew => Mode::SolveCrew,
        }
    }
}

pub fn run(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let settings = Settings::resolve(global);

    if let (Some(work_type), Some(sub)) = (args.work_type, args.sub_variant) {
        if !work_type.accepts(sub) {
            return Err(miette::miette!(
                help = format!("Valid sub-variants: {}", sub_variant_list(work_type)),
                "Sub-variant '{}' does not apply to {} work",
                sub,
                work_type
            ));
        }
    }

    let (work_type, content) = if args.interactive {
        render_interactive(&args, &settings, global.unit)?
    } else {
        // Guaranteed by clap's required_unless_present
        let work_type = args
            .work_type
            .ok_or_else(|| miette::miette!("A work type is required"))?;
        (work_type, render_template(work_type, &args, &settings)?)
    };

    if args.stdout {
        print!("{}", content);
        return Ok(());
    }

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_filename(work_type, args.sub_variant)));

    if path.exists() && !args.force {
        return Err(miette::miette!(
            help = "Use --force to overwrite",
            "File already exists: {}",
            path.display()
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(&path, &content).into_diagnostic()?;

    if !settings.quiet {
        println!(
            "{} Created {} request {}",
            style("✓").green(),
            work_type.display_name(),
            style(path.display()).cyan()
        );
        println!(
            "   {}",
            style(format!("Fill in the geometry, then: buildcrew run {}", path.display())).dim()
        );
    }

    Ok(())
}

fn render_template(work_type: WorkType, args: &NewArgs, settings: &Settings) -> Result<String> {
    let mut ctx = TemplateContext::new(work_type)
        .with_profile(settings.profile)
        .with_unit(settings.unit)
        .with_filename(
            args.output
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| default_filename(work_type, args.sub_variant)),
        );

    if let Some(sub) = args.sub_variant {
        ctx = ctx.with_sub_variant(sub);
    }
    if let Some(mode) = args.mode {
        ctx = ctx.with_mode(mode.into());
    }
    if let Some(title) = &args.title {
        ctx = ctx.with_title(title);
    }
    if let Some(project_type) = &settings.config.project_type {
        ctx = ctx.with_project_type(project_type);
    }
    if let Some(start) = args.start_date {
        ctx = ctx.with_start_date(start);
    }

    let generator = TemplateGenerator::new().map_err(|e| miette::miette!("{}", e))?;
    generator
        .generate_request(&ctx)
        .map_err(|e| miette::miette!("{}", e))
}

fn render_interactive(
    args: &NewArgs,
    settings: &Settings,
    unit: Option<LinearUnit>,
) -> Result<(WorkType, String)> {
    let preset = WizardPreset {
        work_type: args.work_type,
        sub_variant: args.sub_variant,
        mode: args.mode.map(Mode::from),
        unit,
        project_type: settings.config.project_type.clone(),
    };

    let mut doc = RequestWizard::new(settings.profile).run(preset)?;
    if doc.title.is_none() {
        doc.title = args.title.clone();
    }
    if doc.start_date.is_none() {
        doc.start_date = args.start_date;
    }

    let yaml = serde_yml::to_string(&doc).into_diagnostic()?;
    let content = format!(
        "# {} request ({} profile)\n{}",
        doc.work_type.display_name(),
        settings.profile,
        yaml
    );
    Ok((doc.work_type, content))
}

fn default_filename(work_type: WorkType, sub_variant: Option<SubVariant>) -> String {
    match sub_variant {
        Some(sub) => format!("{}-{}{}", work_type, sub, REQUEST_SUFFIX),
        None => format!("{}{}", work_type, REQUEST_SUFFIX),
    }
}

fn sub_variant_list(work_type: WorkType) -> String {
    work_type
        .sub_variants()
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
