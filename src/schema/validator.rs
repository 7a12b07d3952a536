//! Request file validation with source-located diagnostics

use jsonschema::error::ValidationErrorKind;
use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value as JsonValue;
use std::path::Path;
use thiserror::Error;

use crate::schema::registry::SchemaRegistry;
use crate::yaml::YamlError;

/// All schema violations found in one request file
#[derive(Debug, Error, Diagnostic)]
#[error("Schema validation failed: {summary}")]
#[diagnostic(code(buildcrew::schema::validation_error))]
pub struct ValidationError {
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<SchemaViolation>,
}

/// A single schema violation
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SchemaViolation {
    #[label("{}", self.hint)]
    span: SourceSpan,

    message: String,
    hint: String,

    #[help]
    help: Option<String>,
}

impl SchemaViolation {
    pub fn new(message: String, hint: String, span: SourceSpan, help: Option<String>) -> Self {
        Self {
            span,
            message,
            hint,
            help,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ValidationError {
    pub fn new(filename: &str, source: &str, violations: Vec<SchemaViolation>) -> Self {
        let count = violations.len();
        let summary = if count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", count)
        };
        Self {
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }
}

/// Failure validating a file on disk
#[derive(Debug, Error, Diagnostic)]
pub enum ValidateFileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Could not read {path}: {source}")]
    #[diagnostic(code(buildcrew::schema::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Schema-valid but not loadable as a request
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] YamlError),
}

/// Validator for request files
pub struct Validator {
    /// Compiled request schema, absent only if the embedded schema is broken
    compiled: Option<JsonValidator>,
}

impl Validator {
    /// Compile the request schema from the registry
    pub fn new(registry: &SchemaRegistry) -> Self {
        let compiled = registry
            .request()
            .and_then(|text| serde_json::from_str::<JsonValue>(text).ok())
            .and_then(|json| validator_for(&json).ok());

        if compiled.is_none() {
            tracing::warn!("Request schema could not be compiled; skipping schema validation");
        }

        Self { compiled }
    }

    /// Collect every violation in `content`
    pub fn validate(&self, content: &str, filename: &str) -> Result<(), ValidationError> {
        let yaml_value: serde_yml::Value = match serde_yml::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                let span = find_error_span(content, e.location());
                let violation = SchemaViolation::new(
                    format!("YAML parse error: {}", e),
                    "invalid YAML".to_string(),
                    span,
                    Some("Check YAML syntax - proper indentation, colons, quotes".to_string()),
                );
                return Err(ValidationError::new(filename, content, vec![violation]));
            }
        };

        let json_value: JsonValue = match serde_json::to_value(&yaml_value) {
            Ok(v) => v,
            Err(e) => {
                let violation = SchemaViolation::new(
                    format!("Failed to convert YAML to JSON: {}", e),
                    "conversion error".to_string(),
                    (0, content.len()).into(),
                    None,
                );
                return Err(ValidationError::new(filename, content, vec![violation]));
            }
        };

        let Some(schema) = &self.compiled else {
            return Ok(());
        };

        let violations: Vec<SchemaViolation> = schema
            .iter_errors(&json_value)
            .map(|e| error_to_violation(content, &e))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(filename, content, violations))
        }
    }

    /// Read and validate a file
    pub fn validate_file(&self, path: &Path) -> Result<(), ValidateFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ValidateFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(self.validate(&content, &path.display().to_string())?)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&SchemaRegistry::default())
    }
}

/// Convert a JSON Schema validation error to our violation format
fn error_to_violation(content: &str, error: &JsonSchemaError) -> SchemaViolation {
    let path = error.instance_path.to_string();
    let message = format_schema_error(error);
    let hint = format_error_hint(error);
    let help = generate_help_message(error);
    let span = find_path_span(content, &path);

    SchemaViolation::new(message, hint, span, help)
}

fn format_schema_error(error: &JsonSchemaError) -> String {
    let path = if error.instance_path.as_str().is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", error.instance_path)
    };

    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let prop_str = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            format!("Missing required field: {} at {}", prop_str, path)
        }
        ValidationErrorKind::Type { kind } => {
            format!("Wrong type at {}: expected {:?}", path, kind)
        }
        ValidationErrorKind::Enum { options } => {
            format!(
                "Invalid value at {}: must be one of: {}",
                path,
                format_enum_options(options)
            )
        }
        ValidationErrorKind::Pattern { pattern } => {
            format!("Value at {} doesn't match pattern: {}", path, pattern)
        }
        ValidationErrorKind::Minimum { limit } => {
            format!("Value at {} is too small: minimum {}", path, limit)
        }
        ValidationErrorKind::ExclusiveMinimum { limit } => {
            format!("Value at {} must be greater than {}", path, limit)
        }
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            format!("Unknown field(s) at {}: {}", path, unexpected.join(", "))
        }
        ValidationErrorKind::FalseSchema => {
            format!("Field {} does not apply to this work type", path)
        }
        _ => format!("Validation error at {}: {}", path, error),
    }
}

fn format_enum_options(options: &JsonValue) -> String {
    if let Some(arr) = options.as_array() {
        arr.iter()
            .map(|v| v.as_str().map(|s| s.to_string()).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        options.to_string()
    }
}

/// Short hint for the error label
fn format_error_hint(error: &JsonSchemaError) -> String {
    match &error.kind {
        ValidationErrorKind::Required { .. } => "required field missing",
        ValidationErrorKind::Type { .. } => "wrong type",
        ValidationErrorKind::Enum { .. } => "invalid value",
        ValidationErrorKind::Pattern { .. } => "pattern mismatch",
        ValidationErrorKind::Minimum { .. } | ValidationErrorKind::ExclusiveMinimum { .. } => {
            "out of range"
        }
        ValidationErrorKind::AdditionalProperties { .. } => "unknown field",
        ValidationErrorKind::FalseSchema => "not allowed here",
        _ => "validation error",
    }
    .to_string()
}

fn generate_help_message(error: &JsonSchemaError) -> Option<String> {
    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let prop_str = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            Some(format!("Add the '{}' field to your file", prop_str))
        }
        ValidationErrorKind::Enum { options } => {
            Some(format!("Valid values: {}", format_enum_options(options)))
        }
        ValidationErrorKind::Pattern { .. } if error.instance_path.as_str() == "/start_date" => {
            Some("Dates are written YYYY-MM-DD, e.g. 2026-11-02".to_string())
        }
        ValidationErrorKind::ExclusiveMinimum { .. } => {
            Some("Measurements must be positive numbers".to_string())
        }
        ValidationErrorKind::Type { kind } => Some(format!("Expected value of type: {:?}", kind)),
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            if unexpected.len() == 1 {
                Some(format!("Remove the '{}' field or check spelling", unexpected[0]))
            } else {
                Some("Remove unknown fields or check spelling".to_string())
            }
        }
        ValidationErrorKind::FalseSchema => {
            Some("Remove it; steel, roof and masonry work take no sub_variant".to_string())
        }
        _ => None,
    }
}

/// Span for a YAML parser error location
fn find_error_span(content: &str, location: Option<serde_yml::Location>) -> SourceSpan {
    if let Some(loc) = location {
        let line = loc.line().saturating_sub(1);
        let column = loc.column().saturating_sub(1);

        let mut offset = 0;
        for (i, line_content) in content.lines().enumerate() {
            if i == line {
                offset += column;
                break;
            }
            offset += line_content.len() + 1;
        }

        let rest_of_content = &content[offset.min(content.len())..];
        let len = rest_of_content
            .find('\n')
            .unwrap_or(rest_of_content.len())
            .max(1);

        (offset, len).into()
    } else {
        let len = content.find('\n').unwrap_or(content.len()).max(1);
        (0, len).into()
    }
}

/// Span for a JSON pointer ("/geometry/width") in YAML content
fn find_path_span(content: &str, json_path: &str) -> SourceSpan {
    let parts: Vec<&str> = json_path.split('/').filter(|s| !s.is_empty()).collect();

    if let Some(span) = find_nested_key_span(content, &parts) {
        return span;
    }

    if let Some(key) = parts.last() {
        if let Some(span) = find_key_span(content, key) {
            return span;
        }
    }

    let len = content.find('\n').unwrap_or(content.len()).max(1);
    (0, len).into()
}

/// Follow each path component to a deeper-indented key, so `/solve/crew`
/// does not land on an unrelated `crew:` elsewhere in the file
fn find_nested_key_span(content: &str, parts: &[&str]) -> Option<SourceSpan> {
    if parts.is_empty() {
        return None;
    }

    let mut offset = 0;
    let mut depth = 0;
    let mut min_indent = 0;

    for line in content.lines() {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        let is_key = trimmed.starts_with(&format!("{}:", parts[depth]));

        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            if depth > 0 && indent < min_indent {
                return None;
            }
            if is_key && indent >= min_indent {
                depth += 1;
                if depth == parts.len() {
                    return Some((offset + indent, trimmed.len()).into());
                }
                min_indent = indent + 1;
            }
        }
        offset += line.len() + 1;
    }

    None
}

/// First `key:` at the start of a line
fn find_key_span(content: &str, key: &str) -> Option<SourceSpan> {
    let search_pattern = format!("{}:", key);

    let mut offset = 0;
    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with(&search_pattern) {
            let key_start = offset + (line.len() - trimmed.len());
            return Some((key_start, trimmed.len()).into());
        }
        offset += line.len() + 1;
    }
    None
}
