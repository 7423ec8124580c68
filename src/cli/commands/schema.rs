//! `partwise schema` - print the embedded design document schema
//!
//! Lets editors and automation validate design files without the binary.

use miette::{IntoDiagnostic, Result};
use serde_json::Value;

use crate::cli::output::print_structured;
use crate::cli::{OutputFormat, Session};
use crate::schema::{schema_text, DESIGN_SCHEMA};

#[derive(clap::Args, Debug)]
pub struct SchemaArgs {
    /// List top-level fields instead of printing the raw schema
    #[arg(long)]
    pub fields: bool,
}

pub fn run(args: SchemaArgs, session: &Session) -> Result<()> {
    let text = schema_text(DESIGN_SCHEMA)
        .ok_or_else(|| miette::miette!("Embedded schema '{}' is missing", DESIGN_SCHEMA))?;

    if args.fields {
        let schema: Value = serde_json::from_str(&text).into_diagnostic()?;
        for (name, description) in top_level_fields(&schema) {
            println!("{:<24} {}", name, description);
        }
        return Ok(());
    }

    match session.format {
        OutputFormat::Yaml => {
            let schema: Value = serde_json::from_str(&text).into_diagnostic()?;
            print_structured(&schema, OutputFormat::Yaml)
        }
        _ => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}

/// (field, description or type) for each top-level property
fn top_level_fields(schema: &Value) -> Vec<(String, String)> {
    schema["properties"]
        .as_object()
        .map(|props| {
            props
                .iter()
                .map(|(name, prop)| {
                    let description = prop["description"]
                        .as_str()
                        .or_else(|| prop["type"].as_str())
                        .unwrap_or("")
                        .to_string();
                    (name.clone(), description)
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_fields() {
        let text = schema_text(DESIGN_SCHEMA).unwrap();
        let schema: Value = serde_json::from_str(&text).unwrap();
        let fields = top_level_fields(&schema);
        let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"primary_geometry"));
        assert!(names.contains(&"manufacturing_process"));
        let quantity = fields.iter().find(|(n, _)| n == "quantity").unwrap();
        assert!(quantity.1.starts_with("Production quantity"));
    }
}
