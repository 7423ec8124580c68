//! Schema validation with detailed error reporting

use jsonschema::{error::ValidationErrorKind, validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::schema::{schema_text, DESIGN_SCHEMA};

/// Schema validation failure with source location information
#[derive(Debug, Error, Diagnostic)]
#[error("Schema validation failed: {summary}")]
#[diagnostic(code(partwise::schema::validation))]
pub struct SchemaError {
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

impl SchemaError {
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

    /// Get the number of violations
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }
}

/// Design document validator backed by the embedded JSON schema
pub struct Validator {
    compiled: Option<JsonValidator>,
}

impl Validator {
    /// Compile a validator from schema text. Unparseable schemas validate nothing.
    pub fn from_schema(schema: &str) -> Self {
        let compiled = serde_json::from_str::<JsonValue>(schema)
            .ok()
            .and_then(|json| validator_for(&json).ok());
        if compiled.is_none() {
            tracing::warn!("design schema failed to compile, schema checks disabled");
        }
        Self { compiled }
    }

    /// Validate YAML (or JSON) content, reporting every violation
    pub fn validate(&self, content: &str, filename: &str) -> Result<(), SchemaError> {
        // First parse YAML to JSON value
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
                return Err(SchemaError::new(filename, content, vec![violation]));
            }
        };

        // Convert YAML value to JSON value for schema validation
        let json_value: JsonValue = match serde_json::to_value(&yaml_value) {
            Ok(v) => v,
            Err(e) => {
                let violation = SchemaViolation::new(
                    format!("Failed to convert YAML to JSON: {}", e),
                    "conversion error".to_string(),
                    (0, content.len()).into(),
                    None,
                );
                return Err(SchemaError::new(filename, content, vec![violation]));
            }
        };

        // An empty document is an all-defaults design
        let json_value = if json_value.is_null() {
            JsonValue::Object(Default::default())
        } else {
            json_value
        };

        let Some(schema) = self.compiled.as_ref() else {
            return Ok(());
        };

        let violations: Vec<SchemaViolation> = schema
            .iter_errors(&json_value)
            .map(|e| error_to_violation(content, &e))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::new(filename, content, violations))
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::from_schema(&schema_text(DESIGN_SCHEMA).unwrap_or_default())
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

/// Format a JSON Schema error into a user-friendly message
fn format_schema_error(error: &JsonSchemaError) -> String {
    let path = if error.instance_path.as_str().is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", error.instance_path)
    };

    match &error.kind {
        ValidationErrorKind::Type { kind } => {
            format!("Wrong type at {}: expected {:?}", path, kind)
        }
        ValidationErrorKind::Enum { options } => {
            format!("Invalid value at {}: must be one of: {}", path, format_enum_options(options))
        }
        ValidationErrorKind::Minimum { limit } => {
            format!("Value at {} is too small: minimum {}", path, limit)
        }
        ValidationErrorKind::ExclusiveMinimum { limit } => {
            format!("Value at {} must be greater than {}", path, limit)
        }
        ValidationErrorKind::MinItems { limit } => {
            format!("Too few items at {}: minimum {}", path, limit)
        }
        ValidationErrorKind::MaxItems { limit } => {
            format!("Too many items at {}: maximum {}", path, limit)
        }
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            format!("Unknown field(s) at {}: {}", path, unexpected.join(", "))
        }
        ValidationErrorKind::Required { property } => {
            let prop_str = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            format!("Missing required field: {} at {}", prop_str, path)
        }
        _ => format!("Validation error at {}: {}", path, error),
    }
}

/// Format enum options as a string
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

/// Generate a short hint for the error label
fn format_error_hint(error: &JsonSchemaError) -> String {
    match &error.kind {
        ValidationErrorKind::Required { .. } => "required field missing".to_string(),
        ValidationErrorKind::Type { .. } => "wrong type".to_string(),
        ValidationErrorKind::Enum { .. } => "invalid value".to_string(),
        ValidationErrorKind::Minimum { .. } | ValidationErrorKind::ExclusiveMinimum { .. } => {
            "out of range".to_string()
        }
        ValidationErrorKind::MinItems { .. } | ValidationErrorKind::MaxItems { .. } => {
            "wrong length".to_string()
        }
        ValidationErrorKind::AdditionalProperties { .. } => "unknown field".to_string(),
        _ => "validation error".to_string(),
    }
}

/// Generate a help message with suggestions for fixing the error
fn generate_help_message(error: &JsonSchemaError) -> Option<String> {
    match &error.kind {
        ValidationErrorKind::Enum { options } => {
            Some(format!("Valid values: {}", format_enum_options(options)))
        }
        ValidationErrorKind::ExclusiveMinimum { .. } => {
            Some("Dimensions are millimeters and must be positive".to_string())
        }
        ValidationErrorKind::MinItems { .. } | ValidationErrorKind::MaxItems { .. } => {
            if error.instance_path.as_str().contains("positions") {
                Some("Hole positions are [x, y] pairs".to_string())
            } else {
                Some("Rib dimensions are [length, thickness, height]".to_string())
            }
        }
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            if unexpected.len() == 1 {
                Some(format!("Remove the '{}' field or check spelling", unexpected[0]))
            } else {
                Some("Remove unknown fields or check spelling".to_string())
            }
        }
        _ => None,
    }
}

/// Find the span (byte offset, length) for an error location
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

        (offset.min(content.len()), len).into()
    } else {
        first_line_span(content)
    }
}

fn first_line_span(content: &str) -> SourceSpan {
    let len = content.find('\n').unwrap_or(content.len()).max(1);
    (0, len).into()
}

/// Find the span for a JSON path in YAML content
fn find_path_span(content: &str, json_path: &str) -> SourceSpan {
    // e.g. "/primary_geometry/length" or "/mounting_pattern/positions/0"
    let keys: Vec<&str> = json_path
        .split('/')
        .filter(|s| !s.is_empty() && s.parse::<usize>().is_err())
        .collect();

    keys.last()
        .and_then(|key| find_key_span(content, key))
        .unwrap_or_else(|| first_line_span(content))
}

/// Find the span of a key in YAML content
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
