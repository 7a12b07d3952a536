//! Crew from a known duration
//!
//! The inverse of the duration estimate: every role independently needs
//! `ceil(quantity / (coefficient × days))` workers. Roles are never averaged.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::EstimateError;
use crate::core::work::{Role, WorkType};
use crate::engine::productivity::{Coefficients, Profile};
use crate::engine::request::RoleHeadcounts;

/// Result of solving for crew
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewEstimate {
    /// Required workers per role (zero for roles that do not take part)
    pub headcounts: RoleHeadcounts,
    /// Roles that take part under the active profile
    pub roles: Vec<Role>,
    /// Canonical quantity the estimate was computed from
    pub quantity: f64,
    /// Target duration the crew was sized for
    pub duration_days: u32,
    /// Risk delay of the work item (informational, does not size the crew)
    pub delay_days: u32,
}

/// Estimate the crew needed to finish `quantity` in `duration_days`
pub fn estimate_crew(
    profile: Profile,
    work_type: WorkType,
    quantity: f64,
    duration_days: i64,
    delay_days: u32,
    coefficients: &Coefficients,
) -> Result<CrewEstimate, EstimateError> {
    let days = u32::try_from(duration_days)
        .ok()
        .filter(|d| *d > 0)
        .ok_or(EstimateError::InvalidDuration {
            days: duration_days,
        })?;

    let mut headcounts = RoleHeadcounts::default();
    let mut roles = Vec::with_capacity(3);

    for (role, coefficient) in coefficients.roles() {
        let mut required = quantity / (coefficient * f64::from(days));

        // Two-role roofing needs half as many foremen as welders or laborers
        if profile == Profile::TwoRole && work_type == WorkType::Roof && role == Role::Special {
            required /= 2.0;
        }

        let count = EstimateError::whole("crew size", required)?;
        debug!(role = %role, required, count, "Sized role");
        headcounts.set(role, count);
        roles.push(role);
    }

    let total = headcounts
        .checked_total()
        .ok_or_else(|| EstimateError::Overflow {
            what: "crew size",
            value: Role::all()
                .iter()
                .map(|r| f64::from(headcounts.get(*r)))
                .sum(),
        })?;

    debug!(
        work_type = %work_type,
        quantity,
        duration_days = days,
        total,
        "Estimated crew"
    );

    Ok(CrewEstimate {
        headcounts,
        roles,
        quantity,
        duration_days: days,
        delay_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::productivity::ProductivityTable;

    fn coefficients(profile: Profile, work_type: WorkType) -> &'static Coefficients {
        ProductivityTable::for_profile(profile)
            .lookup(work_type, None)
            .unwrap()
    }

    #[test]
    fn test_steel_crew_for_six_days() {
        let c = coefficients(Profile::ThreeRole, WorkType::Steel);
        let est = estimate_crew(Profile::ThreeRole, WorkType::Steel, 1000.0, 6, 0, c).unwrap();
        // 1000/(1059.2345*6)=0.16, 1000/(264.8086*6)=0.63, 1000/(88.2695*6)=1.89
        assert_eq!(est.headcounts, RoleHeadcounts::new(1, 1, 2));
        assert_eq!(est.roles, vec![Role::Special, Role::Special2, Role::Labor]);
        assert_eq!(est.duration_days, 6);
    }

    #[test]
    fn test_masonry_crew() {
        let c = coefficients(Profile::ThreeRole, WorkType::Masonry);
        // 27 m² in 2 days: 27/15.3=1.76 -> 2, 27/30.6=0.88 -> 1, 27/15.3 -> 2
        let est = estimate_crew(Profile::ThreeRole, WorkType::Masonry, 27.0, 2, 0, c).unwrap();
        assert_eq!(est.headcounts, RoleHeadcounts::new(2, 1, 2));
    }

    #[test]
    fn test_zero_or_negative_duration_invalid() {
        let c = coefficients(Profile::ThreeRole, WorkType::Tile);
        for days in [0, -1, -30] {
            let err = estimate_crew(Profile::ThreeRole, WorkType::Tile, 10.0, days, 0, c).unwrap_err();
            assert_eq!(err, EstimateError::InvalidDuration { days });
        }
    }

    #[test]
    fn test_two_role_roof_halves_special_only() {
        let c = coefficients(Profile::TwoRole, WorkType::Roof);
        // 96 m² in 3 days: 96/24 = 4 per role, foreman halved to 2
        let est = estimate_crew(Profile::TwoRole, WorkType::Roof, 96.0, 3, 0, c).unwrap();
        assert_eq!(est.headcounts, RoleHeadcounts::new(2, 4, 4));

        // 100 m² in 3 days: 4.17 -> 5 welders/laborers, 2.08 -> 3 foremen
        let est = estimate_crew(Profile::TwoRole, WorkType::Roof, 100.0, 3, 0, c).unwrap();
        assert_eq!(est.headcounts, RoleHeadcounts::new(3, 5, 5));
    }

    #[test]
    fn test_three_role_roof_not_halved() {
        let c = coefficients(Profile::ThreeRole, WorkType::Roof);
        // 80 m² in 2 days: 80/8.304 = 9.63 -> 10, 80/16.608 = 4.82 -> 5
        let est = estimate_crew(Profile::ThreeRole, WorkType::Roof, 80.0, 2, 0, c).unwrap();
        assert_eq!(est.headcounts, RoleHeadcounts::new(10, 10, 5));
    }

    #[test]
    fn test_two_role_has_no_special2() {
        let c = coefficients(Profile::TwoRole, WorkType::Masonry);
        let est = estimate_crew(Profile::TwoRole, WorkType::Masonry, 20.0, 3, 0, c).unwrap();
        assert_eq!(est.roles, vec![Role::Special, Role::Labor]);
        assert_eq!(est.headcounts.special2, 0);
        // 20 / (3.33333 * 3) = 2.0000002 -> 3
        assert_eq!(est.headcounts.special, 3);
    }

    #[test]
    fn test_huge_quantity_is_overflow() {
        let c = coefficients(Profile::ThreeRole, WorkType::Steel);
        let err = estimate_crew(Profile::ThreeRole, WorkType::Steel, 1e300, 1, 0, c).unwrap_err();
        assert!(matches!(err, EstimateError::Overflow { what: "crew size", .. }));
    }

    #[test]
    fn test_roles_that_fit_but_sum_past_u32_is_overflow() {
        let c = coefficients(Profile::ThreeRole, WorkType::Masonry);
        // Each role fits on its own (2e9, 1e9, 2e9) but the crew total does not
        let err =
            estimate_crew(Profile::ThreeRole, WorkType::Masonry, 7.65 * 2.0e9, 1, 0, c).unwrap_err();
        assert!(matches!(err, EstimateError::Overflow { .. }));
    }

    #[test]
    fn test_delay_does_not_size_crew() {
        let c = coefficients(Profile::ThreeRole, WorkType::Painting);
        let calm = estimate_crew(Profile::ThreeRole, WorkType::Painting, 40.0, 4, 0, c).unwrap();
        let risky = estimate_crew(Profile::ThreeRole, WorkType::Painting, 40.0, 4, 18, c).unwrap();
        assert_eq!(calm.headcounts, risky.headcounts);
        assert_eq!(risky.delay_days, 18);
    }
}
