//! Interactive request builder
//!
//! Walks the user through one work item: trade, member, measurements, risk
//! flags, and the known side of the estimate. Anything already given on the
//! command line is not asked again.

use chrono::NaiveDate;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};

use crate::core::units::{LinearUnit, UnitSystem};
use crate::core::work::{Role, SubVariant, WorkType};
use crate::engine::{
    Geometry, Mode, Profile, ProductivityTable, RiskFactor, RiskFactors, RoleHeadcounts, Solve,
};
use crate::entities::request::{GeometryFields, RequestDocument, DEFAULT_CHB_WIDTH};

/// Values fixed before the wizard starts
#[derive(Debug, Clone, Default)]
pub struct WizardPreset {
    pub work_type: Option<WorkType>,
    pub sub_variant: Option<SubVariant>,
    pub mode: Option<Mode>,
    pub unit: Option<LinearUnit>,
    pub project_type: Option<String>,
}

/// Prompts for a complete request document
pub struct RequestWizard {
    profile: Profile,
    theme: ColorfulTheme,
}

impl RequestWizard {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            theme: ColorfulTheme::default(),
        }
    }

    /// Run the prompts and assemble a request document
    pub fn run(&self, preset: WizardPreset) -> Result<RequestDocument> {
        let work_type = match preset.work_type {
            Some(w) => w,
            None => self.select_work_type()?,
        };

        println!();
        println!(
            "{} New {} request ({} profile)",
            style("◆").cyan(),
            style(work_type.display_name()).bold(),
            self.profile
        );
        println!("{}", style("─".repeat(50)).dim());
        println!();

        let sub_variant = match preset.sub_variant {
            Some(s) => Some(s),
            None => self.select_sub_variant(work_type)?,
        };

        let unit = match preset.unit {
            Some(u) => u,
            None => self.select_unit()?,
        };

        let title: String = Input::with_theme(&self.theme)
            .with_prompt("Title")
            .default(work_type.display_name().to_string())
            .interact_text()
            .into_diagnostic()?;

        let project_type: String = Input::with_theme(&self.theme)
            .with_prompt("Project type")
            .default(preset.project_type.unwrap_or_default())
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        let start_date = self.prompt_start_date()?;

        let units = UnitSystem::new(unit, work_type);
        let geometry = self.prompt_geometry(work_type, &units)?;
        let mut fields = GeometryFields::from(&geometry);
        if work_type == WorkType::Masonry {
            fields.chb_width = Some(self.prompt_positive("CHB width (in)", Some(DEFAULT_CHB_WIDTH))?);
        }

        let risks = self.prompt_risks()?;

        let mode = match preset.mode {
            Some(m) => m,
            None => self.select_mode()?,
        };
        let solve = match mode {
            Mode::SolveDuration => Solve::Duration {
                crew: self.prompt_crew(work_type, sub_variant)?,
            },
            Mode::SolveCrew => Solve::Crew {
                duration_days: self.prompt_days()?,
            },
        };

        println!();
        println!("{} Request complete", style("✓").green());

        Ok(RequestDocument {
            title: Some(title),
            project_type: Some(project_type).filter(|p| !p.is_empty()),
            start_date,
            unit,
            work_type,
            sub_variant,
            geometry: fields,
            risks,
            solve,
            total: None,
        })
    }

    fn select_work_type(&self) -> Result<WorkType> {
        let items: Vec<&str> = WorkType::all().iter().map(|w| w.menu_label()).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Work type")
            .items(&items)
            .default(0)
            .interact()
            .into_diagnostic()?;
        Ok(WorkType::all()[selection])
    }

    fn select_sub_variant(&self, work_type: WorkType) -> Result<Option<SubVariant>> {
        let variants = work_type.sub_variants();
        if variants.is_empty() {
            return Ok(None);
        }
        let items: Vec<&str> = variants.iter().map(|s| s.display_name()).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Member")
            .items(&items)
            .default(0)
            .interact()
            .into_diagnostic()?;
        Ok(Some(variants[selection]))
    }

    fn select_unit(&self) -> Result<LinearUnit> {
        let items: Vec<&str> = LinearUnit::all().iter().map(|u| u.label()).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Measurement unit")
            .items(&items)
            .default(0)
            .interact()
            .into_diagnostic()?;
        Ok(LinearUnit::all()[selection])
    }

    fn select_mode(&self) -> Result<Mode> {
        let items = ["Estimate duration from a crew", "Estimate crew from a duration"];
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Solve for")
            .items(&items)
            .default(0)
            .interact()
            .into_diagnostic()?;
        Ok(if selection == 0 {
            Mode::SolveDuration
        } else {
            Mode::SolveCrew
        })
    }

    fn prompt_start_date(&self) -> Result<Option<NaiveDate>> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt("Start date (YYYY-MM-DD, blank to skip)")
            .allow_empty(true)
            .validate_with(|v: &String| -> std::result::Result<(), String> {
                if v.trim().is_empty() {
                    return Ok(());
                }
                NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()
            .into_diagnostic()?;

        if value.trim().is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(Some)
            .into_diagnostic()
    }

    fn prompt_geometry(&self, work_type: WorkType, units: &UnitSystem) -> Result<Geometry> {
        let unit = units.linear_label();
        let area = format!("{}²", unit);
        let geometry = match work_type {
            WorkType::Concrete => Geometry::Concrete {
                width: self.prompt_positive(&format!("Width ({})", unit), None)?,
                length: self.prompt_positive(&format!("Length ({})", unit), None)?,
                depth: self.prompt_positive(&format!("Depth ({})", unit), None)?,
                count: self.prompt_positive("Number of members", Some(1.0))?,
            },
            WorkType::Masonry => Geometry::Masonry {
                wall_length: self.prompt_positive(&format!("Wall length ({})", unit), None)?,
                wall_height: self.prompt_positive(&format!("Wall height ({})", unit), None)?,
                area_of_window: self.prompt_non_negative(&format!("Window area ({})", area))?,
                area_of_door: self.prompt_non_negative(&format!("Door area ({})", area))?,
            },
            WorkType::Painting => Geometry::Painting {
                width: self.prompt_positive(&format!("Wall width ({})", unit), None)?,
                height: self.prompt_positive(&format!("Wall height ({})", unit), None)?,
            },
            WorkType::Tile => Geometry::Tile {
                width: self.prompt_positive(&format!("Width ({})", unit), None)?,
                height: self.prompt_positive(&format!("Height ({})", unit), None)?,
            },
            WorkType::Steel => Geometry::Steel {
                rebar_mass: self.prompt_positive("Total rebar (kg)", None)?,
            },
            WorkType::Roof => Geometry::Roof {
                roof_area: self.prompt_positive(&format!("Roof area ({})", area), None)?,
            },
        };
        Ok(geometry)
    }

    fn prompt_positive(&self, prompt: &str, default: Option<f64>) -> Result<f64> {
        let mut input = Input::<f64>::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|v: &f64| -> std::result::Result<(), &str> {
                if v.is_finite() && *v > 0.0 {
                    Ok(())
                } else {
                    Err("must be greater than zero")
                }
            });
        if let Some(d) = default {
            input = input.default(d);
        }
        input.interact_text().into_diagnostic()
    }

    fn prompt_non_negative(&self, prompt: &str) -> Result<f64> {
        Input::<f64>::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(0.0)
            .validate_with(|v: &f64| -> std::result::Result<(), &str> {
                if v.is_finite() && *v >= 0.0 {
                    Ok(())
                } else {
                    Err("must not be negative")
                }
            })
            .interact_text()
            .into_diagnostic()
    }

    fn prompt_risks(&self) -> Result<RiskFactors> {
        let items: Vec<String> = RiskFactor::all()
            .iter()
            .map(|f| format!("{} (+{} days)", f.label(), f.weight()))
            .collect();
        let chosen = MultiSelect::with_theme(&self.theme)
            .with_prompt("Risk factors (space to toggle)")
            .items(&items)
            .interact()
            .into_diagnostic()?;

        let mut risks = RiskFactors::default();
        for index in chosen {
            risks.set(RiskFactor::all()[index], true);
        }
        Ok(risks)
    }

    fn prompt_crew(
        &self,
        work_type: WorkType,
        sub_variant: Option<SubVariant>,
    ) -> Result<RoleHeadcounts> {
        let coefficients = ProductivityTable::for_profile(self.profile)
            .lookup(work_type, sub_variant)?;

        let mut crew = RoleHeadcounts::default();
        for (role, _) in coefficients.roles() {
            let count: u32 = Input::with_theme(&self.theme)
                .with_prompt(format!("{} ({})", role.label(work_type), role))
                .default(if role == Role::Labor { 2 } else { 1 })
                .interact_text()
                .into_diagnostic()?;
            crew.set(role, count);
        }
        Ok(crew)
    }

    fn prompt_days(&self) -> Result<i64> {
        Input::<i64>::with_theme(&self.theme)
            .with_prompt("Target duration (days)")
            .validate_with(|v: &i64| -> std::result::Result<(), &str> {
                if *v > 0 {
                    Ok(())
                } else {
                    Err("must be at least 1 day")
                }
            })
            .interact_text()
            .into_diagnostic()
    }
}

impl Default for RequestWizard {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}
