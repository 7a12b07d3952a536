//! Request schema, templates, and interactive prompts

pub mod registry;
pub mod template;
pub mod validator;
pub mod wizard;

pub use registry::SchemaRegistry;
pub use template::{TemplateContext, TemplateGenerator};
pub use validator::{ValidationError, Validator};
pub use wizard::{RequestWizard, WizardPreset};
