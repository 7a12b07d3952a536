//! buildcrew: construction work estimation
//!
//! Estimates how many days a crew needs for a construction work item, or
//! how large a crew must be to finish it in a given number of days, from
//! measured geometry, a calibrated productivity table, and qualitative
//! schedule risks.

pub mod cli;
pub mod core;
pub mod engine;
pub mod entities;
pub mod schema;
pub mod yaml;
