//! Request document - one work item as stored in a `*.request.yaml` file
//!
//! The file form is flatter and more forgiving than the engine's
//! [`EstimationRequest`]: geometry is a bag of optional measurements whose
//! required members depend on `work_type`, and project metadata rides along
//! for the report. [`RequestDocument::to_request`] narrows it into the
//! engine's typed request.

use chrono::NaiveDate;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::units::LinearUnit;
use crate::core::work::{SubVariant, WorkType};
use crate::engine::{EstimationRequest, Geometry, RiskFactors, Solve};
use crate::yaml::{YamlError, YamlSyntaxError};

/// Width of a concrete hollow block when the file does not say
pub const DEFAULT_CHB_WIDTH: f64 = 4.0;

/// A request file could not be turned into an engine request
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum RequestError {
    #[error("Missing geometry field `{field}` for {work_type} work")]
    #[diagnostic(
        code(buildcrew::request::missing_field),
        help("Run `buildcrew new {work_type}` to see the fields this work type needs")
    )]
    MissingField {
        work_type: WorkType,
        field: &'static str,
    },
}

/// Raw geometry measurements, all optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeometryFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Number of identical concrete members
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_of_window: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_of_door: Option<f64>,
    /// Block width in inches, echoed in reports only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chb_width: Option<f64>,
    /// Total rebar mass in kg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebar_mass: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roof_area: Option<f64>,
}

impl GeometryFields {
    /// Pull the measurements `work_type` needs into a typed [`Geometry`]
    pub fn to_geometry(&self, work_type: WorkType) -> Result<Geometry, RequestError> {
        let need = |value: Option<f64>, field: &'static str| {
            value.ok_or(RequestError::MissingField { work_type, field })
        };

        let geometry = match work_type {
            WorkType::Concrete => Geometry::Concrete {
                width: need(self.width, "width")?,
                length: need(self.length, "length")?,
                depth: need(self.depth, "depth")?,
                count: need(self.count, "count")?,
            },
            WorkType::Masonry => Geometry::Masonry {
                wall_length: need(self.wall_length, "wall_length")?,
                wall_height: need(self.wall_height, "wall_height")?,
                area_of_window: self.area_of_window.unwrap_or(0.0),
                area_of_door: self.area_of_door.unwrap_or(0.0),
            },
            WorkType::Painting => Geometry::Painting {
                width: need(self.width, "width")?,
                height: need(self.height, "height")?,
            },
            WorkType::Tile => Geometry::Tile {
                width: need(self.width, "width")?,
                height: need(self.height, "height")?,
            },
            WorkType::Steel => Geometry::Steel {
                rebar_mass: need(self.rebar_mass, "rebar_mass")?,
            },
            WorkType::Roof => Geometry::Roof {
                roof_area: need(self.roof_area, "roof_area")?,
            },
        };

        for field in self.unused_fields(work_type) {
            warn!(work_type = %work_type, field, "Geometry field does not apply; ignoring");
        }

        Ok(geometry)
    }

    /// Names of the fields that are set but mean nothing for `work_type`
    pub fn unused_fields(&self, work_type: WorkType) -> Vec<&'static str> {
        let set = [
            ("width", self.width),
            ("length", self.length),
            ("depth", self.depth),
            ("height", self.height),
            ("count", self.count),
            ("wall_length", self.wall_length),
            ("wall_height", self.wall_height),
            ("area_of_window", self.area_of_window),
            ("area_of_door", self.area_of_door),
            ("chb_width", self.chb_width),
            ("rebar_mass", self.rebar_mass),
            ("roof_area", self.roof_area),
        ];
        let used: &[&str] = match work_type {
            WorkType::Concrete => &["width", "length", "depth", "count"],
            WorkType::Masonry => &[
                "wall_length",
                "wall_height",
                "area_of_window",
                "area_of_door",
                "chb_width",
            ],
            WorkType::Painting | WorkType::Tile => &["width", "height"],
            WorkType::Steel => &["rebar_mass"],
            WorkType::Roof => &["roof_area"],
        };

        set.iter()
            .filter(|(name, value)| value.is_some() && !used.contains(name))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl From<&Geometry> for GeometryFields {
    fn from(geometry: &Geometry) -> Self {
        let mut fields = GeometryFields::default();
        match *geometry {
            Geometry::Concrete {
                width,
                length,
                depth,
                count,
            } => {
                fields.width = Some(width);
                fields.length = Some(length);
                fields.depth = Some(depth);
                fields.count = Some(count);
            }
            Geometry::Masonry {
                wall_length,
                wall_height,
                area_of_window,
                area_of_door,
            } => {
                fields.wall_length = Some(wall_length);
                fields.wall_height = Some(wall_height);
                fields.area_of_window = Some(area_of_window);
                fields.area_of_door = Some(area_of_door);
            }
            Geometry::Painting { width, height } | Geometry::Tile { width, height } => {
                fields.width = Some(width);
                fields.height = Some(height);
            }
            Geometry::Steel { rebar_mass } => fields.rebar_mass = Some(rebar_mass),
            Geometry::Roof { roof_area } => fields.roof_area = Some(roof_area),
        }
        fields
    }
}

/// One work item as written in a request file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Free-text project label, e.g. "Bungalow"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    /// Linear unit the measurements were taken in (labels only)
    #[serde(default)]
    pub unit: LinearUnit,

    pub work_type: WorkType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_variant: Option<SubVariant>,

    pub geometry: GeometryFields,

    #[serde(default)]
    pub risks: RiskFactors,

    pub solve: Solve,

    /// Previously computed quantity; never trusted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl RequestDocument {
    /// Wrap an engine request with default metadata
    pub fn from_request(request: &EstimationRequest, unit: LinearUnit) -> Self {
        Self {
            title: None,
            project_type: None,
            start_date: None,
            unit,
            work_type: request.work_type(),
            sub_variant: request.sub_variant,
            geometry: GeometryFields::from(&request.geometry),
            risks: request.risks,
            solve: request.solve,
            total: None,
        }
    }

    /// Parse a request from YAML text
    pub fn from_yaml(source: &str, filename: &str) -> Result<Self, YamlSyntaxError> {
        serde_yml::from_str(source)
            .map_err(|e| YamlSyntaxError::from_serde_error(&e, source, filename))
    }

    /// Read and parse a request file
    pub fn load(path: &Path) -> Result<Self, YamlError> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&source, &path.display().to_string())?)
    }

    /// Narrow the document into an engine request
    pub fn to_request(&self) -> Result<EstimationRequest, RequestError> {
        let geometry = self.geometry.to_geometry(self.work_type)?;
        Ok(EstimationRequest {
            geometry,
            sub_variant: self.sub_variant,
            risks: self.risks,
            solve: self.solve,
        })
    }

    /// Block width for masonry work
    pub fn chb_width(&self) -> Option<f64> {
        match self.work_type {
            WorkType::Masonry => Some(self.geometry.chb_width.unwrap_or(DEFAULT_CHB_WIDTH)),
            _ => None,
        }
    }

    /// Log when a stored total disagrees with the freshly resolved quantity
    pub fn check_stale_total(&self, quantity: f64) {
        if let Some(total) = self.total {
            if (total - quantity).abs() > 1e-6 {
                warn!(
                    stored = total,
                    resolved = quantity,
                    "Stored total differs from the measured quantity; using the measurement"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RoleHeadcounts;

    const FOOTING: &str = r#"
title: Footing F1
project_type: Bungalow
start_date: 2026-11-02
unit: m
work_type: concrete
sub_variant: footing
geometry:
  width: 4
  length: 5
  depth: 0.1
  count: 1
risks:
  rainy_season: true
solve:
  mode: duration
  crew:
    special: 1
    special2: 1
    labor: 1
"#;

    #[test]
    fn test_parse_full_document() {
        let doc = RequestDocument::from_yaml(FOOTING, "footing.request.yaml").unwrap();
        assert_eq!(doc.work_type, WorkType::Concrete);
        assert_eq!(doc.sub_variant, Some(SubVariant::Footing));
        assert_eq!(doc.project_type.as_deref(), Some("Bungalow"));
        assert_eq!(doc.start_date, NaiveDate::from_ymd_opt(2026, 11, 2));
        assert!(doc.risks.rainy_season);

        let req = doc.to_request().unwrap();
        assert_eq!(req.work_type(), WorkType::Concrete);
        assert!((req.geometry.quantity().unwrap() - 2.0).abs() < 1e-10);
        assert_eq!(
            req.solve,
            Solve::Duration {
                crew: RoleHeadcounts::new(1, 1, 1)
            }
        );
    }

    #[test]
    fn test_missing_field_named() {
        let yaml = r#"
work_type: steel
geometry:
  roof_area: 10
solve:
  mode: crew
  duration_days: 3
"#;
        let doc = RequestDocument::from_yaml(yaml, "x.yaml").unwrap();
        assert_eq!(
            doc.to_request().unwrap_err(),
            RequestError::MissingField {
                work_type: WorkType::Steel,
                field: "rebar_mass"
            }
        );
    }

    #[test]
    fn test_masonry_openings_default_to_zero() {
        let fields = GeometryFields {
            wall_length: Some(3.0),
            wall_height: Some(2.0),
            ..Default::default()
        };
        let geometry = fields.to_geometry(WorkType::Masonry).unwrap();
        assert!((geometry.quantity().unwrap() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_unused_fields_reported() {
        let fields = GeometryFields {
            width: Some(2.0),
            height: Some(3.0),
            roof_area: Some(40.0),
            ..Default::default()
        };
        assert_eq!(fields.unused_fields(WorkType::Painting), vec!["roof_area"]);
        assert_eq!(fields.unused_fields(WorkType::Roof), vec!["width", "height"]);
    }

    #[test]
    fn test_chb_width_defaults_for_masonry_only() {
        let mut doc = RequestDocument::from_yaml(FOOTING, "f.yaml").unwrap();
        assert_eq!(doc.chb_width(), None);
        doc.work_type = WorkType::Masonry;
        assert_eq!(doc.chb_width(), Some(DEFAULT_CHB_WIDTH));
        doc.geometry.chb_width = Some(6.0);
        assert_eq!(doc.chb_width(), Some(6.0));
    }

    #[test]
    fn test_legacy_risk_name_accepted() {
        let yaml = r#"
work_type: roof
geometry:
  roof_area: 40
risks:
  lack_of_water: true
solve:
  mode: crew
  duration_days: 2
"#;
        let doc = RequestDocument::from_yaml(yaml, "r.yaml").unwrap();
        assert!(doc.risks.lack_of_skill);
        assert_eq!(doc.risks.delay_days(), 1);
    }

    #[test]
    fn test_unknown_field_is_syntax_error() {
        let yaml = "work_type: roof\ngeometry:\n  roof_aera: 40\nsolve:\n  mode: crew\n  duration_days: 2\n";
        let err = RequestDocument::from_yaml(yaml, "typo.yaml").unwrap_err();
        assert!(err.message().contains("roof_aera"));
    }

    #[test]
    fn test_from_request_round_trips() {
        let req = EstimationRequest::crew(Geometry::Roof { roof_area: 50.0 }, 4);
        let doc = RequestDocument::from_request(&req, LinearUnit::Ft);
        let yaml = serde_yml::to_string(&doc).unwrap();
        let parsed = RequestDocument::from_yaml(&yaml, "rt.yaml").unwrap();
        assert_eq!(parsed.unit, LinearUnit::Ft);
        assert_eq!(parsed.to_request().unwrap(), req);
    }
}
