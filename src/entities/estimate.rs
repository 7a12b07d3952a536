//! Estimate report - what a run hands back to the user
//!
//! Joins the engine [`Outcome`] with the request's metadata: display names,
//! quantity unit label, the active risk flags, and the calendar dates derived
//! from the optional start date.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::units::UnitSystem;
use crate::core::work::{Role, SubVariant, WorkType};
use crate::engine::{Mode, Outcome, Profile, RiskFactor};
use crate::entities::request::RequestDocument;

/// One role's line in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewLine {
    pub role: Role,

    /// Site label ("Foreman", "Welder", ...)
    pub label: String,

    pub headcount: u32,

    /// This role's own estimate in days (duration mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<f64>,
}

/// A finished estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Request file the estimate came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,

    pub work_type: WorkType,

    /// Display name, e.g. "Concrete Works"
    pub work_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_variant: Option<SubVariant>,

    pub profile: Profile,
    pub mode: Mode,

    pub quantity: f64,
    pub quantity_unit: String,

    /// Block width in inches (masonry only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chb_width: Option<f64>,

    #[serde(default)]
    pub risks: Vec<RiskFactor>,
    pub delay_days: u32,

    /// Mean of the per-role estimates before the delay (duration mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_days: Option<f64>,

    pub duration_days: u32,

    pub crew: Vec<CrewLine>,
    pub total_crew: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_completion: Option<NaiveDate>,
}

impl Estimate {
    /// Build the report for `doc` from an engine outcome
    pub fn new(doc: &RequestDocument, profile: Profile, outcome: &Outcome) -> Self {
        let work_type = doc.work_type;
        let line = |role: Role, headcount: u32, days: Option<f64>| CrewLine {
            role,
            label: role.label(work_type).to_string(),
            headcount,
            days,
        };

        let (mode, crew, average_days) = match outcome {
            Outcome::Duration(d) => (
                Mode::SolveDuration,
                d.per_role
                    .iter()
                    .map(|r| line(r.role, r.headcount, Some(r.days)))
                    .collect::<Vec<_>>(),
                Some(d.average_days),
            ),
            Outcome::Crew(c) => (
                Mode::SolveCrew,
                c.roles
                    .iter()
                    .map(|role| line(*role, c.headcounts.get(*role), None))
                    .collect(),
                None,
            ),
        };

        let duration_days = outcome.duration_days();
        let total_crew = crew
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.headcount));

        Self {
            title: doc.title.clone(),
            source: None,
            project_type: doc.project_type.clone(),
            work_type,
            work_name: work_type.display_name().to_string(),
            sub_variant: doc.sub_variant,
            profile,
            mode,
            quantity: outcome.quantity(),
            quantity_unit: UnitSystem::new(doc.unit, work_type).quantity_label(),
            chb_width: doc.chb_width(),
            risks: doc.risks.active(),
            delay_days: outcome.delay_days(),
            average_days,
            duration_days,
            crew,
            total_crew,
            start_date: doc.start_date,
            expected_completion: doc
                .start_date
                .and_then(|start| expected_completion(start, duration_days)),
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Headcount reported for a role (zero when the role is absent)
    pub fn headcount(&self, role: Role) -> u32 {
        self.crew
            .iter()
            .find(|l| l.role == role)
            .map(|l| l.headcount)
            .unwrap_or(0)
    }

    /// Short label for tables: title, else file stem, else work name
    pub fn name(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        self.source
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(|n| n.trim_end_matches(".request.yaml").to_string())
            .unwrap_or_else(|| self.work_name.clone())
    }
}

/// Calendar date work started on `start` finishes after `days` days
pub fn expected_completion(start: NaiveDate, days: u32) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(u64::from(days)))
}
