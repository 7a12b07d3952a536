//! `buildcrew duration` command - Estimate days from a known crew

use miette::Result;

use crate::cli::commands::utils::{estimate_document, ItemArgs};
use crate::cli::helpers::Settings;
use crate::cli::output::print_estimates;
use crate::cli::GlobalOpts;
use crate::engine::{RoleHeadcounts, Solve};

#[derive(clap::Args, Debug)]
pub struct DurationArgs {
    #[command(flatten)]
    pub item: ItemArgs,

    /// Foreman headcount (Skilled for steel, Painter for painting)
    #[arg(long, default_value_t = 0)]
    pub special: u32,

    /// Skilled headcount (Welder for roofing)
    #[arg(long, default_value_t = 0)]
    pub special2: u32,

    /// Unskilled headcount
    #[arg(long, default_value_t = 0)]
    pub labor: u32,
}

pub fn run(args: DurationArgs, global: &GlobalOpts) -> Result<()> {
    let settings = Settings::resolve(global);

    let solve = Solve::Duration {
        crew: RoleHeadcounts::new(args.special, args.special2, args.labor),
    };
    let doc = args.item.to_document(solve, &settings);
    let estimate = estimate_document(&doc, &settings)?;

    print_estimates(&[estimate], settings.format)
}
