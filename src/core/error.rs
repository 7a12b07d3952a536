//! Estimation failures

use miette::Diagnostic;
use thiserror::Error;

use crate::core::work::{SubVariant, WorkType};

/// A deterministic input failure reported by the estimation engine
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum EstimateError {
    #[error("Invalid geometry: {reason}")]
    #[diagnostic(
        code(buildcrew::engine::invalid_geometry),
        help("Dimensions must be positive numbers; wall openings must be smaller than the wall")
    )]
    InvalidGeometry { reason: String },

    #[error("Insufficient crew for {work_type}: every role has zero headcount")]
    #[diagnostic(
        code(buildcrew::engine::insufficient_crew),
        help("Assign at least one worker to a role of this trade")
    )]
    InsufficientCrew { work_type: WorkType },

    #[error("Invalid duration: {days} day(s)")]
    #[diagnostic(
        code(buildcrew::engine::invalid_duration),
        help("The target duration must be at least 1 day")
    )]
    InvalidDuration { days: i64 },

    #[error("Unsupported work type: {work_type}{}", variant_suffix(.sub_variant))]
    #[diagnostic(
        code(buildcrew::engine::unsupported_work_type),
        help("The active productivity profile has no coefficients for this combination")
    )]
    UnsupportedWorkType {
        work_type: WorkType,
        sub_variant: Option<SubVariant>,
    },

    #[error("Estimated {what} is out of range: {value:e}")]
    #[diagnostic(
        code(buildcrew::engine::overflow),
        help("The quantity is too large for whole-day or whole-worker counts; check the geometry for a unit or exponent mistake")
    )]
    Overflow { what: &'static str, value: f64 },

    #[error("Request asks to {requested} but was built to {actual}")]
    #[diagnostic(code(buildcrew::engine::mode_mismatch))]
    ModeMismatch {
        requested: &'static str,
        actual: &'static str,
    },
}

fn variant_suffix(sub_variant: &Option<SubVariant>) -> String {
    match sub_variant {
        Some(sub) => format!(" / {}", sub),
        None => String::new(),
    }
}

impl EstimateError {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        EstimateError::InvalidGeometry {
            reason: reason.into(),
        }
    }

    /// Round `value` up to a whole count, failing when it does not fit in a `u32`
    pub(crate) fn whole(what: &'static str, value: f64) -> Result<u32, Self> {
        let rounded = value.ceil();
        if rounded.is_finite() && rounded >= 0.0 && rounded <= f64::from(u32::MAX) {
            Ok(rounded as u32)
        } else {
            Err(EstimateError::Overflow { what, value })
        }
    }
}
