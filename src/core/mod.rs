//! Core module - fundamental types and utilities

pub mod config;
pub mod error;
pub mod loader;
pub mod units;
pub mod work;

pub use config::Config;
pub use error::EstimateError;
pub use units::{Dimension, LinearUnit, UnitSystem};
pub use work::{ParseError, Role, SubVariant, WorkType};
