//! Shared arguments and plumbing for the estimate commands

use chrono::NaiveDate;
use miette::Result;
use tracing::debug;

use crate::cli::helpers::Settings;
use crate::core::work::{SubVariant, WorkType};
use crate::engine::{Estimator, RiskFactors, Solve};
use crate::entities::{Estimate, GeometryFields, RequestDocument};

/// Work item described on the command line
#[derive(clap::Args, Debug)]
pub struct ItemArgs {
    /// Work type (concrete, masonry, painting, tile, steel, roof)
    pub work_type: WorkType,

    /// Sub-variant (e.g., footing, floor-slab, interior-wall, floor-tile)
    #[arg(long, short = 's')]
    pub sub_variant: Option<SubVariant>,

    #[command(flatten)]
    pub geometry: GeometryArgs,

    #[command(flatten)]
    pub risks: RiskArgs,

    /// Title shown in the report
    #[arg(long)]
    pub title: Option<String>,

    /// Project label, e.g. Bungalow
    #[arg(long)]
    pub project_type: Option<String>,

    /// Start date (YYYY-MM-DD); adds an expected completion date
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

/// Measurements, in the configured linear unit
#[derive(clap::Args, Debug, Default)]
#[command(next_help_heading = "Geometry")]
pub struct GeometryArgs {
    #[arg(long)]
    pub width: Option<f64>,

    #[arg(long)]
    pub length: Option<f64>,

    #[arg(long)]
    pub depth: Option<f64>,

    #[arg(long)]
    pub height: Option<f64>,

    /// Number of identical concrete members
    #[arg(long)]
    pub count: Option<f64>,

    #[arg(long)]
    pub wall_length: Option<f64>,

    #[arg(long)]
    pub wall_height: Option<f64>,

    /// Total window area in the wall
    #[arg(long = "window-area")]
    pub area_of_window: Option<f64>,

    /// Total door area in the wall
    #[arg(long = "door-area")]
    pub area_of_door: Option<f64>,

    /// Concrete hollow block width in inches (reported only)
    #[arg(long)]
    pub chb_width: Option<f64>,

    /// Total rebar mass in kg
    #[arg(long)]
    pub rebar_mass: Option<f64>,

    #[arg(long)]
    pub roof_area: Option<f64>,
}

impl From<&GeometryArgs> for GeometryFields {
    fn from(args: &GeometryArgs) -> Self {
        GeometryFields {
            width: args.width,
            length: args.length,
            depth: args.depth,
            height: args.height,
            count: args.count,
            wall_length: args.wall_length,
            wall_height: args.wall_height,
            area_of_window: args.area_of_window,
            area_of_door: args.area_of_door,
            chb_width: args.chb_width,
            rebar_mass: args.rebar_mass,
            roof_area: args.roof_area,
        }
    }
}

/// Schedule risk flags
#[derive(clap::Args, Debug, Default)]
#[command(next_help_heading = "Risks")]
pub struct RiskArgs {
    /// Work falls in the rainy season (+4 days)
    #[arg(long)]
    pub rainy_season: bool,

    /// Material deliveries are unreliable (+5 days)
    #[arg(long)]
    pub lack_of_material: bool,

    /// Labor is scarce (+1 day)
    #[arg(long)]
    pub lack_of_labor: bool,

    /// Crew lacks experience with this work (+1 day)
    #[arg(long)]
    pub lack_of_skill: bool,

    /// Tools or equipment are short (+5 days)
    #[arg(long)]
    pub lack_of_tools: bool,

    /// Rework is expected (+2 days)
    #[arg(long)]
    pub rework: bool,

    /// Set every risk flag
    #[arg(long)]
    pub all_risks: bool,
}

impl From<&RiskArgs> for RiskFactors {
    fn from(args: &RiskArgs) -> Self {
        if args.all_risks {
            return RiskFactors::all_set();
        }
        RiskFactors {
            rainy_season: args.rainy_season,
            lack_of_material: args.lack_of_material,
            lack_of_labor: args.lack_of_labor,
            lack_of_skill: args.lack_of_skill,
            lack_of_tools: args.lack_of_tools,
            rework: args.rework,
        }
    }
}

impl ItemArgs {
    /// Assemble a request document for the given solve
    pub fn to_document(&self, solve: Solve, settings: &Settings) -> RequestDocument {
        RequestDocument {
            title: self.title.clone(),
            project_type: self
                .project_type
                .clone()
                .or_else(|| settings.config.project_type.clone()),
            start_date: self.start_date,
            unit: settings.unit,
            work_type: self.work_type,
            sub_variant: self.sub_variant,
            geometry: GeometryFields::from(&self.geometry),
            risks: RiskFactors::from(&self.risks),
            solve,
            total: None,
        }
    }
}

/// Run one request document through the engine and build its report
pub fn estimate_document(doc: &RequestDocument, settings: &Settings) -> Result<Estimate> {
    let request = doc.to_request()?;
    let estimator = Estimator::new(settings.profile);
    let outcome = estimator.estimate(&request)?;

    debug!(
        work_type = %doc.work_type,
        mode = %request.mode(),
        quantity = outcome.quantity(),
        duration_days = outcome.duration_days(),
        "Estimate complete"
    );

    doc.check_stale_total(outcome.quantity());
    Ok(Estimate::new(doc, settings.profile, &outcome))
}
