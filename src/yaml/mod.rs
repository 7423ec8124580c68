//! Design document loading (YAML or JSON)

pub mod diagnostics;

pub use diagnostics::{YamlError, YamlSyntaxError};

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::entities::DesignDocument;

/// True for paths that should be parsed as JSON rather than YAML
pub fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// True for file names that look like design documents
pub fn is_design_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "yaml" | "yml" | "json"))
        .unwrap_or(false)
}

/// Parse document text. An empty YAML document is the all-defaults value.
pub fn parse_str<T: DeserializeOwned + Default + 'static>(
    content: &str,
    filename: &str,
    json: bool,
) -> Result<T, YamlSyntaxError> {
    if json {
        return serde_json::from_str(content)
            .map_err(|e| YamlSyntaxError::from_json_error(&e, content, filename));
    }
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yml::from_str(content).map_err(|e| YamlSyntaxError::from_serde_error(&e, content, filename))
}

/// Read and parse a design document
pub fn load_design(path: &Path) -> Result<(String, DesignDocument), YamlError> {
    let content = std::fs::read_to_string(path).map_err(|source| YamlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path.display().to_string();
    let document = parse_str(&content, &filename, is_json(path))?;
    tracing::debug!(path = %filename, "loaded design document");
    Ok((content, document))
}
