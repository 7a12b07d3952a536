//! Estimation engine
//!
//! A stateless transformation from an [`EstimationRequest`] into either a
//! duration or a crew. The quantity and the risk delay are resolved first;
//! the request's [`Solve`] then picks exactly one of the two estimators.
//!
//! ```
//! use buildcrew::engine::{Estimator, EstimationRequest, Geometry, Profile, RoleHeadcounts};
//!
//! let estimator = Estimator::new(Profile::ThreeRole);
//! let request = EstimationRequest::duration(
//!     Geometry::Steel { rebar_mass: 1000.0 },
//!     RoleHeadcounts::new(1, 1, 1),
//! );
//! let estimate = estimator.estimate_duration(&request).unwrap();
//! assert_eq!(estimate.duration_days, 6);
//! ```

pub mod crew;
pub mod delay;
pub mod duration;
pub mod productivity;
pub mod quantity;
pub mod request;

pub use crew::CrewEstimate;
pub use delay::{RiskFactor, RiskFactors};
pub use duration::{DurationEstimate, RoleDays};
pub use productivity::{Bucket, Coefficients, Profile, ProductivityTable};
pub use quantity::Geometry;
pub use request::{EstimationRequest, Mode, RoleHeadcounts, Solve};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::EstimateError;

/// Outcome of a mode-dispatched estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Outcome {
    Duration(DurationEstimate),
    Crew(CrewEstimate),
}

impl Outcome {
    pub fn quantity(&self) -> f64 {
        match self {
            Outcome::Duration(d) => d.quantity,
            Outcome::Crew(c) => c.quantity,
        }
    }

    pub fn duration_days(&self) -> u32 {
        match self {
            Outcome::Duration(d) => d.duration_days,
            Outcome::Crew(c) => c.duration_days,
        }
    }

    pub fn delay_days(&self) -> u32 {
        match self {
            Outcome::Duration(d) => d.delay_days,
            Outcome::Crew(c) => c.delay_days,
        }
    }
}

/// Estimator bound to one productivity profile
///
/// Cheap to copy and safe to share between threads: it only holds a
/// reference to a static, read-only table.
#[derive(Debug, Clone, Copy)]
pub struct Estimator {
    table: &'static ProductivityTable,
}

impl Estimator {
    pub fn new(profile: Profile) -> Self {
        Self {
            table: ProductivityTable::for_profile(profile),
        }
    }

    pub fn profile(&self) -> Profile {
        self.table.profile()
    }

    pub fn table(&self) -> &'static ProductivityTable {
        self.table
    }

    /// Solve for duration; the request must carry a crew
    pub fn estimate_duration(
        &self,
        request: &EstimationRequest,
    ) -> Result<DurationEstimate, EstimateError> {
        let Solve::Duration { crew } = request.solve else {
            return Err(EstimateError::ModeMismatch {
                requested: "solve for duration",
                actual: "solve for crew",
            });
        };

        let (quantity, delay_days, coefficients) = self.prepare(request)?;
        duration::estimate_duration(
            request.work_type(),
            quantity,
            &crew,
            delay_days,
            coefficients,
        )
    }

    /// Solve for crew; the request must carry a duration
    pub fn estimate_crew(&self, request: &EstimationRequest) -> Result<CrewEstimate, EstimateError> {
        let Solve::Crew { duration_days } = request.solve else {
            return Err(EstimateError::ModeMismatch {
                requested: "solve for crew",
                actual: "solve for duration",
            });
        };

        let (quantity, delay_days, coefficients) = self.prepare(request)?;
        crew::estimate_crew(
            self.profile(),
            request.work_type(),
            quantity,
            duration_days,
            delay_days,
            coefficients,
        )
    }

    /// Run whichever estimator the request's mode selects
    pub fn estimate(&self, request: &EstimationRequest) -> Result<Outcome, EstimateError> {
        match request.mode() {
            Mode::SolveDuration => self.estimate_duration(request).map(Outcome::Duration),
            Mode::SolveCrew => self.estimate_crew(request).map(Outcome::Crew),
        }
    }

    /// Quantity, delay, and coefficients shared by both estimators
    fn prepare(
        &self,
        request: &EstimationRequest,
    ) -> Result<(f64, u32, &'static Coefficients), EstimateError> {
        let work_type = request.work_type();
        let coefficients = self.table.lookup(work_type, request.sub_variant)?;
        let quantity = request.geometry.quantity()?;
        let delay_days = request.risks.delay_days();

        debug!(
            work_type = %work_type,
            profile = %self.profile(),
            quantity,
            delay_days,
            "Resolved request"
        );

        Ok((quantity, delay_days, coefficients))
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}
