//! Canonical quantity of a work item
//!
//! Reduces the work-type specific geometry to one scalar: a volume for
//! concrete, an area for masonry, painting, tile, and roofing, and a mass in
//! kilograms for rebar.

use serde::{Deserialize, Serialize};

use crate::core::error::EstimateError;
use crate::core::work::WorkType;

/// Measurements of a work item, one variant per work type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "work_type", rename_all = "kebab-case")]
pub enum Geometry {
    Concrete {
        width: f64,
        length: f64,
        depth: f64,
        /// Number of identical members
        count: f64,
    },
    Masonry {
        wall_length: f64,
        wall_height: f64,
        area_of_window: f64,
        area_of_door: f64,
    },
    Painting {
        width: f64,
        height: f64,
    },
    Tile {
        width: f64,
        height: f64,
    },
    Steel {
        /// Total rebar mass in kilograms
        rebar_mass: f64,
    },
    Roof {
        roof_area: f64,
    },
}

impl Geometry {
    pub fn work_type(&self) -> WorkType {
        match self {
            Geometry::Concrete { .. } => WorkType::Concrete,
            Geometry::Masonry { .. } => WorkType::Masonry,
            Geometry::Painting { .. } => WorkType::Painting,
            Geometry::Tile { .. } => WorkType::Tile,
            Geometry::Steel { .. } => WorkType::Steel,
            Geometry::Roof { .. } => WorkType::Roof,
        }
    }

    /// Resolve the canonical quantity
    pub fn quantity(&self) -> Result<f64, EstimateError> {
        match *self {
            Geometry::Concrete {
                width,
                length,
                depth,
                count,
            } => {
                positive("width", width)?;
                positive("length", length)?;
                positive("depth", depth)?;
                positive("count", count)?;
                Ok(width * length * depth * count)
            }
            Geometry::Masonry {
                wall_length,
                wall_height,
                area_of_window,
                area_of_door,
            } => {
                positive("wall length", wall_length)?;
                positive("wall height", wall_height)?;
                non_negative("window area", area_of_window)?;
                non_negative("door area", area_of_door)?;

                let wall_area = wall_length * wall_height;
                let openings = area_of_window + area_of_door;
                let net = wall_area - openings;
                if net <= 0.0 {
                    return Err(EstimateError::geometry(format!(
                        "openings ({}) are not smaller than the wall area ({})",
                        openings, wall_area
                    )));
                }
                Ok(net)
            }
            Geometry::Painting { width, height } | Geometry::Tile { width, height } => {
                positive("width", width)?;
                positive("height", height)?;
                Ok(width * height)
            }
            Geometry::Steel { rebar_mass } => {
                positive("rebar mass", rebar_mass)?;
                Ok(rebar_mass)
            }
            Geometry::Roof { roof_area } => {
                positive("roof area", roof_area)?;
                Ok(roof_area)
            }
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), EstimateError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EstimateError::geometry(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), EstimateError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EstimateError::geometry(format!(
            "{} must be zero or more, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concrete(width: f64, length: f64, depth: f64, count: f64) -> Geometry {
        Geometry::Concrete {
            width,
            length,
            depth,
            count,
        }
    }

    fn masonry(wall_length: f64, wall_height: f64, window: f64, door: f64) -> Geometry {
        Geometry::Masonry {
            wall_length,
            wall_height,
            area_of_window: window,
            area_of_door: door,
        }
    }

    #[test]
    fn test_concrete_volume() {
        let q = concrete(4.0, 5.0, 0.1, 1.0).quantity().unwrap();
        assert!((q - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_concrete_volume_is_exact_product() {
        for (w, l, d, n) in [(1.5, 2.25, 0.3, 4.0), (0.2, 0.2, 3.0, 12.0), (10.0, 0.75, 0.125, 2.0)] {
            assert_eq!(concrete(w, l, d, n).quantity().unwrap(), w * l * d * n);
        }
    }

    #[test]
    fn test_concrete_rejects_non_positive_and_nan() {
        for g in [
            concrete(0.0, 5.0, 0.1, 1.0),
            concrete(4.0, -5.0, 0.1, 1.0),
            concrete(4.0, 5.0, f64::NAN, 1.0),
            concrete(4.0, 5.0, 0.1, 0.0),
            concrete(f64::INFINITY, 5.0, 0.1, 1.0),
        ] {
            assert!(matches!(g.quantity(), Err(EstimateError::InvalidGeometry { .. })));
        }
    }

    #[test]
    fn test_masonry_net_wall_area() {
        let q = masonry(10.0, 3.0, 1.0, 2.0).quantity().unwrap();
        assert!((q - 27.0).abs() < 1e-10);
    }

    #[test]
    fn test_masonry_openings_at_or_above_wall_area_fail() {
        assert!(matches!(
            masonry(2.0, 2.0, 2.0, 2.0).quantity(),
            Err(EstimateError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            masonry(2.0, 2.0, 3.0, 2.0).quantity(),
            Err(EstimateError::InvalidGeometry { .. })
        ));
        assert!(masonry(2.0, 2.0, 1.0, 2.9).quantity().unwrap() > 0.0);
    }

    #[test]
    fn test_masonry_negative_opening_fails() {
        assert!(masonry(10.0, 3.0, -1.0, 0.0).quantity().is_err());
    }

    #[test]
    fn test_painting_and_tile_area() {
        assert_eq!(Geometry::Painting { width: 3.0, height: 2.5 }.quantity().unwrap(), 7.5);
        assert_eq!(Geometry::Tile { width: 4.0, height: 4.0 }.quantity().unwrap(), 16.0);
    }

    #[test]
    fn test_direct_quantities() {
        assert_eq!(Geometry::Steel { rebar_mass: 1000.0 }.quantity().unwrap(), 1000.0);
        assert_eq!(Geometry::Roof { roof_area: 120.0 }.quantity().unwrap(), 120.0);
        assert!(Geometry::Roof { roof_area: 0.0 }.quantity().is_err());
    }

    #[test]
    fn test_work_type_follows_variant() {
        assert_eq!(Geometry::Steel { rebar_mass: 1.0 }.work_type(), WorkType::Steel);
        assert_eq!(masonry(1.0, 1.0, 0.0, 0.0).work_type(), WorkType::Masonry);
    }
}
