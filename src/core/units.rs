//! Unit labels for reporting quantities
//!
//! Units are advisory metadata: the engine never rescales values between
//! unit systems. The chosen linear unit only changes the label printed next
//! to a measurement, and the work type decides whether the canonical
//! quantity is labelled as an area (²) or a volume (³).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::work::{ParseError, WorkType};

/// Linear unit chosen for geometry input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinearUnit {
    #[default]
    M,
    Mm,
    Cm,
    In,
    Ft,
}

impl LinearUnit {
    /// Display label ("m", "mm", ...)
    pub fn label(&self) -> &'static str {
        match self {
            LinearUnit::M => "m",
            LinearUnit::Mm => "mm",
            LinearUnit::Cm => "cm",
            LinearUnit::In => "in",
            LinearUnit::Ft => "ft",
        }
    }

    pub fn all() -> &'static [LinearUnit] {
        &[
            LinearUnit::M,
            LinearUnit::Mm,
            LinearUnit::Cm,
            LinearUnit::In,
            LinearUnit::Ft,
        ]
    }
}

impl fmt::Display for LinearUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LinearUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(LinearUnit::M),
            "mm" => Ok(LinearUnit::Mm),
            "cm" => Ok(LinearUnit::Cm),
            "in" | "inch" | "inches" => Ok(LinearUnit::In),
            "ft" | "feet" | "foot" => Ok(LinearUnit::Ft),
            _ => Err(ParseError::UnknownUnit(s.to_string())),
        }
    }
}

/// Dimensional exponent of a canonical quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Area,
    Volume,
}

impl Dimension {
    /// Volume for concrete, area for everything else
    pub fn of(work_type: WorkType) -> Self {
        match work_type {
            WorkType::Concrete => Dimension::Volume,
            _ => Dimension::Area,
        }
    }

    pub fn exponent(&self) -> u8 {
        match self {
            Dimension::Area => 2,
            Dimension::Volume => 3,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Dimension::Area => "²",
            Dimension::Volume => "³",
        }
    }
}

/// Unit context for one estimate: a linear unit plus the active work type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSystem {
    pub unit: LinearUnit,
    pub work_type: WorkType,
}

impl UnitSystem {
    pub fn new(unit: LinearUnit, work_type: WorkType) -> Self {
        Self { unit, work_type }
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::of(self.work_type)
    }

    /// Label for the linear unit of geometry fields
    pub fn linear_label(&self) -> &'static str {
        self.unit.label()
    }

    /// Label for the canonical quantity ("m³", "ft²")
    pub fn area_or_volume_label(&self) -> String {
        format!("{}{}", self.unit.label(), self.dimension().suffix())
    }

    /// Label printed next to the resolved quantity.
    ///
    /// Rebar is supplied as a mass, so steel reports kilograms.
    pub fn quantity_label(&self) -> String {
        match self.work_type {
            WorkType::Steel => "kg".to_string(),
            _ => self.area_or_volume_label(),
        }
    }
}
