//! Duration from a known crew
//!
//! Each staffed role gives its own estimate `quantity / (coefficient × headcount)`.
//! Roles with nobody assigned are left out rather than contributing an
//! infinite estimate. The surviving estimates are averaged without weights,
//! the delay factor is added, and the sum is rounded up to whole days.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::EstimateError;
use crate::core::work::{Role, WorkType};
use crate::engine::productivity::Coefficients;
use crate::engine::request::RoleHeadcounts;

/// One role's contribution to a duration estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleDays {
    pub role: Role,
    pub headcount: u32,
    pub coefficient: f64,
    pub days: f64,
}

/// Result of solving for duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationEstimate {
    /// Whole days, delay included
    pub duration_days: u32,
    /// Canonical quantity the estimate was computed from
    pub quantity: f64,
    /// Risk delay added to the productivity estimate
    pub delay_days: u32,
    /// Unweighted mean of the per-role estimates
    pub average_days: f64,
    /// Per-role estimates for the roles that were staffed
    pub per_role: Vec<RoleDays>,
}

/// Estimate the number of days `crew` needs for `quantity`
pub fn estimate_duration(
    work_type: WorkType,
    quantity: f64,
    crew: &RoleHeadcounts,
    delay_days: u32,
    coefficients: &Coefficients,
) -> Result<DurationEstimate, EstimateError> {
    for role in Role::all() {
        if coefficients.get(*role).is_none() && crew.get(*role) > 0 {
            warn!(
                work_type = %work_type,
                role = %role,
                headcount = crew.get(*role),
                "Role does not take part in this work type under the active profile; ignoring"
            );
        }
    }

    let per_role: Vec<RoleDays> = coefficients
        .roles()
        .filter_map(|(role, coefficient)| {
            let headcount = crew.get(role);
            if headcount == 0 {
                debug!(role = %role, "No workers assigned; role left out of the average");
                return None;
            }
            let days = quantity / (coefficient * f64::from(headcount));
            Some(RoleDays {
                role,
                headcount,
                coefficient,
                days,
            })
        })
        .collect();

    if per_role.is_empty() {
        return Err(EstimateError::InsufficientCrew { work_type });
    }

    let average_days = per_role.iter().map(|r| r.days).sum::<f64>() / per_role.len() as f64;
    let duration_days = EstimateError::whole("duration", f64::from(delay_days) + average_days)?;

    debug!(
        work_type = %work_type,
        quantity,
        average_days,
        delay_days,
        duration_days,
        "Estimated duration"
    );

    Ok(DurationEstimate {
        duration_days,
        quantity,
        delay_days,
        average_days,
        per_role,
    })
}
