//! Template generation for new request files

use chrono::NaiveDate;
use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::core::units::LinearUnit;
use crate::core::work::{Role, SubVariant, WorkType};
use crate::engine::{Mode, Profile, ProductivityTable};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const REQUEST_TEMPLATE: &str = "request.yaml.tera";

/// Context for template generation
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub work_type: WorkType,
    pub sub_variant: Option<SubVariant>,
    pub mode: Mode,
    pub profile: Profile,
    pub unit: LinearUnit,
    pub title: Option<String>,
    pub project_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    /// File name mentioned in the header comment
    pub filename: Option<String>,
}

impl TemplateContext {
    pub fn new(work_type: WorkType) -> Self {
        Self {
            work_type,
            sub_variant: None,
            mode: Mode::SolveDuration,
            profile: Profile::default(),
            unit: LinearUnit::default(),
            title: None,
            project_type: None,
            start_date: None,
            filename: None,
        }
    }

    pub fn with_sub_variant(mut self, sub_variant: SubVariant) -> Self {
        self.sub_variant = Some(sub_variant);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_unit(mut self, unit: LinearUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_project_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_type = Some(project_type.into());
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Whether the active profile staffs a special2 role for this work type
    fn has_special2(&self) -> bool {
        ProductivityTable::for_profile(self.profile)
            .lookup(self.work_type, self.sub_variant)
            .map(|c| c.special2.is_some())
            .unwrap_or(false)
    }
}

/// Template generator using Tera
pub struct TemplateGenerator {
    tera: Tera,
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

impl TemplateGenerator {
    /// Create a new template generator with embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render a request file skeleton
    pub fn generate_request(&self, ctx: &TemplateContext) -> Result<String, TemplateError> {
        if !self.tera.get_template_names().any(|n| n == REQUEST_TEMPLATE) {
            return Err(TemplateError::NotFound(REQUEST_TEMPLATE.to_string()));
        }

        let work_type = ctx.work_type;
        let sub_variants = work_type
            .sub_variants()
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let mut context = tera::Context::new();
        context.insert("work_type", work_type.as_str());
        context.insert("work_name", work_type.display_name());
        context.insert("sub_variant", &ctx.sub_variant.map(|s| s.as_str()));
        context.insert("sub_variants", &sub_variants);
        context.insert(
            "mode",
            match ctx.mode {
                Mode::SolveDuration => "duration",
                Mode::SolveCrew => "crew",
            },
        );
        context.insert("unit", ctx.unit.label());
        context.insert(
            "title",
            &ctx.title.clone().unwrap_or_else(|| work_type.display_name().to_string()),
        );
        context.insert("project_type", &ctx.project_type.clone().unwrap_or_default());
        context.insert(
            "start_date",
            &ctx.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
        );
        context.insert(
            "filename",
            &ctx.filename
                .clone()
                .unwrap_or_else(|| format!("{}.request.yaml", work_type.as_str())),
        );
        context.insert("has_special2", &ctx.has_special2());
        context.insert("special_label", Role::Special.label(work_type));
        context.insert("special2_label", Role::Special2.label(work_type));
        context.insert("labor_label", Role::Labor.label(work_type));

        self.tera
            .render(REQUEST_TEMPLATE, &context)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}
