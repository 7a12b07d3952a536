//! Estimation request and crew records

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::work::{Role, SubVariant, WorkType};
use crate::engine::delay::RiskFactors;
use crate::engine::quantity::Geometry;

/// Workers assigned (or required) per role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoleHeadcounts {
    pub special: u32,
    pub special2: u32,
    pub labor: u32,
}

impl RoleHeadcounts {
    pub fn new(special: u32, special2: u32, labor: u32) -> Self {
        Self {
            special,
            special2,
            labor,
        }
    }

    pub fn get(&self, role: Role) -> u32 {
        match role {
            Role::Special => self.special,
            Role::Special2 => self.special2,
            Role::Labor => self.labor,
        }
    }

    pub fn set(&mut self, role: Role, count: u32) {
        match role {
            Role::Special => self.special = count,
            Role::Special2 => self.special2 = count,
            Role::Labor => self.labor = count,
        }
    }

    /// Total workers, `None` when the sum does not fit in a `u32`
    pub fn checked_total(&self) -> Option<u32> {
        self.special
            .checked_add(self.special2)?
            .checked_add(self.labor)
    }
}

/// What the caller wants solved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Crew is known, estimate the duration
    SolveDuration,
    /// Duration is known, estimate the crew
    SolveCrew,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::SolveDuration => "solve-duration",
            Mode::SolveCrew => "solve-crew",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The known side of the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Solve {
    /// Known crew, solve for days
    Duration { crew: RoleHeadcounts },
    /// Known days, solve for crew
    Crew { duration_days: i64 },
}

impl Solve {
    pub fn mode(&self) -> Mode {
        match self {
            Solve::Duration { .. } => Mode::SolveDuration,
            Solve::Crew { .. } => Mode::SolveCrew,
        }
    }
}

/// A single estimation request: one work item, one question
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    pub geometry: Geometry,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_variant: Option<SubVariant>,

    #[serde(default)]
    pub risks: RiskFactors,

    pub solve: Solve,
}

impl EstimationRequest {
    /// Ask for the duration given a crew
    pub fn duration(geometry: Geometry, crew: RoleHeadcounts) -> Self {
        Self {
            geometry,
            sub_variant: None,
            risks: RiskFactors::default(),
            solve: Solve::Duration { crew },
        }
    }

    /// Ask for the crew given a duration in days
    pub fn crew(geometry: Geometry, duration_days: i64) -> Self {
        Self {
            geometry,
            sub_variant: None,
            risks: RiskFactors::default(),
            solve: Solve::Crew { duration_days },
        }
    }

    pub fn with_sub_variant(mut self, sub_variant: SubVariant) -> Self {
        self.sub_variant = Some(sub_variant);
        self
    }

    pub fn with_risks(mut self, risks: RiskFactors) -> Self {
        self.risks = risks;
        self
    }

    /// The work type, as implied by the geometry
    pub fn work_type(&self) -> WorkType {
        self.geometry.work_type()
    }

    pub fn mode(&self) -> Mode {
        self.solve.mode()
    }
}
