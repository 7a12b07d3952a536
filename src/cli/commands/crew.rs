//! `buildcrew crew` command - Size the crew for a target duration

use miette::Result;

use crate::cli::commands::utils::{estimate_document, ItemArgs};
use crate::cli::helpers::Settings;
use crate::cli::output::print_estimates;
use crate::cli::GlobalOpts;
use crate::engine::Solve;

#[derive(clap::Args, Debug)]
pub struct CrewArgs {
    #[command(flatten)]
    pub item: ItemArgs,

    /// Target duration in days
    #[arg(long, short = 'd', allow_negative_numbers = true)]
    pub days: i64,
}

pub fn run(args: CrewArgs, global: &GlobalOpts) -> Result<()> {
    let settings = Settings::resolve(global);

    let solve = Solve::Crew {
        duration_days: args.days,
    };
    let doc = args.item.to_document(solve, &settings);
    let estimate = estimate_document(&doc, &settings)?;

    print_estimates(&[estimate], settings.format)
}
