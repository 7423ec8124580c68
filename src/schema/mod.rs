//! Schema system - embedded design schema and validation

pub mod validator;

pub use validator::{SchemaError, SchemaViolation, Validator};

use rust_embed::Embed;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// File name of the design document schema
pub const DESIGN_SCHEMA: &str = "design.schema.json";

/// Text of an embedded schema
pub fn schema_text(name: &str) -> Option<String> {
    EmbeddedSchemas::get(name).and_then(|file| String::from_utf8(file.data.into_owned()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_schema_embedded() {
        let text = schema_text(DESIGN_SCHEMA).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["title"], "Design");
        assert!(schema_text("missing.schema.json").is_none());
    }
}
