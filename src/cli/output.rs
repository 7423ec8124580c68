//! Structured (YAML / JSON) output

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Serialize a value as YAML or JSON text
pub fn to_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(value).into_diagnostic()?;
            text.push('\n');
            Ok(text)
        }
        _ => {
            let mut text = serde_yml::to_string(value).into_diagnostic()?;
            if !text.ends_with('\n') {
                text.push('\n');
            }
            Ok(text)
        }
    }
}

/// Print a value as YAML or JSON
pub fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    print!("{}", to_structured(value, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_json_and_yaml() {
        let value: BTreeMap<&str, f64> = [("unit_cost", 21.52)].into_iter().collect();
        assert_eq!(
            to_structured(&value, OutputFormat::Json).unwrap(),
            "{\n  \"unit_cost\": 21.52\n}\n"
        );
        assert_eq!(
            to_structured(&value, OutputFormat::Yaml).unwrap(),
            "unit_cost: 21.52\n"
        );
    }

    #[test]
    fn test_yaml_sequence_ends_with_newline() {
        let rows = vec![vec!["cnc_milling", "21.52"], vec!["3d_printing", "31.17"]];
        let text = to_structured(&rows, OutputFormat::Yaml).unwrap();
        assert!(text.ends_with('\n'));
        assert!(!text.ends_with("\n\n"));
    }
}
