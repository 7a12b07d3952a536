//! CLI command implementations

pub mod utils;

pub mod completions;
pub mod config;
pub mod crew;
pub mod duration;
pub mod new;
pub mod profile;
pub mod run;
pub mod validate;
