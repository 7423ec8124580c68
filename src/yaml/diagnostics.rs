//! YAML error diagnostics with source-located messages

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Document syntax or type error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(partwise::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    /// The underlying error message
    message: String,
}

impl YamlSyntaxError {
    /// Create a syntax error from a serde_yml error
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        Self::at_location(err.to_string(), source, filename, line, column, None)
    }

    /// Create a syntax error from a serde_json error
    pub fn from_json_error(err: &serde_json::Error, source: &str, filename: &str) -> Self {
        Self::at_location(
            err.to_string(),
            source,
            filename,
            err.line().max(1),
            err.column().max(1),
            None,
        )
    }

    /// Create a syntax error at a specific location
    pub fn at_location(
        message: impl Into<String>,
        source: &str,
        filename: &str,
        line: usize,
        column: usize,
        help: Option<String>,
    ) -> Self {
        let message = message.into();
        let offset = line_col_to_offset(source, line, column);
        let help = help.or_else(|| generate_help(&message));

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors loading a design document
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("Failed to read {}: {source}", path.display())]
    #[diagnostic(code(partwise::yaml::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convert 1-based line/column to a byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    let mut current_line = 1;

    for (i, ch) in source.char_indices() {
        if current_line == line {
            let line_start = i;
            let mut col = 1;
            for (j, c) in source[line_start..].char_indices() {
                if col == column {
                    return line_start + j;
                }
                if c == '\n' {
                    break;
                }
                col += 1;
            }
            return (line_start + column.saturating_sub(1)).min(source.len());
        }
        if ch == '\n' {
            current_line += 1;
        }
        offset = i;
    }

    offset
}

/// Generate helpful suggestions based on error message
fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("expected ','") || msg_lower.contains("expected comma") {
        return Some("Add commas between list items: [item1, item2, item3]".to_string());
    }

    if msg_lower.contains("tab") {
        return Some(
            "YAML requires spaces for indentation, not tabs. Replace tabs with spaces.".to_string(),
        );
    }

    if msg_lower.contains("duplicate key") || msg_lower.contains("duplicate field") {
        return Some("Each key can only appear once. Remove or rename the duplicate key.".to_string());
    }

    if msg_lower.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    if msg_lower.contains("invalid type") {
        return Some("Dimensions are plain numbers in millimeters, e.g. `length: 120`".to_string());
    }

    if msg_lower.contains("invalid length") {
        return Some("Hole positions are [x, y] pairs; rib dimensions are [length, thickness, height]".to_string());
    }

    if msg_lower.contains("nonzero") || msg_lower.contains("non-zero") {
        return Some("Quantity must be at least 1".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_to_offset() {
        let source = "line1\nline2\nline3";
        assert_eq!(line_col_to_offset(source, 1, 1), 0);
        assert_eq!(line_col_to_offset(source, 2, 1), 6);
        assert_eq!(line_col_to_offset(source, 3, 3), 14);
    }

    #[test]
    fn test_help_generation() {
        assert!(generate_help("expected ','").is_some());
        assert!(generate_help("found tab character").is_some());
        assert!(generate_help("duplicate key").is_some());
        assert!(generate_help("invalid type: string \"wide\", expected f64").is_some());
        assert!(generate_help("some random error").is_none());
    }
}
