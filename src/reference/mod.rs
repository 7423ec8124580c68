//! Reference data - immutable lookup tables consulted by every engine
//!
//! Tables are constructed once (built-in values, optionally merged with an
//! override file) and then only borrowed. Nothing here is global: two
//! differently priced table sets can live side by side in one process.

pub mod components;
pub mod materials;
pub mod processes;
pub mod rules;

pub use components::{Component, ComponentCategory, ComponentSpec};
pub use materials::{Material, DEFAULT_MATERIAL};
pub use processes::{CostModel, ProcessRates, DEFAULT_PROCESS};
pub use rules::{DfmRules, RuleTable};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading reference overrides
#[derive(Debug, Error, Diagnostic)]
pub enum ReferenceError {
    #[error("Failed to read reference file {}: {source}", path.display())]
    #[diagnostic(code(partwise::reference::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid reference file {}: {message}", path.display())]
    #[diagnostic(
        code(partwise::reference::parse),
        help("Reference files contain optional `materials`, `processes` and `rules` maps")
    )]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {table}.{key}.{field}: {value}")]
    #[diagnostic(
        code(partwise::reference::value),
        help("Prices, densities and rates must be finite and non-negative; cycle_time must be positive")
    )]
    InvalidValue {
        table: &'static str,
        key: String,
        field: &'static str,
        value: f64,
    },
}

/// Partial tables read from a YAML override file.
///
/// Entries are merged into the built-in tables key by key; a rule override
/// replaces the whole (material, process) rule set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceOverrides {
    pub materials: BTreeMap<String, Material>,
    pub processes: BTreeMap<String, ProcessRates>,
    pub rules: RuleTable,
}

impl ReferenceOverrides {
    /// Parse overrides from YAML text
    pub fn from_yaml_str(content: &str, path: &Path) -> Result<Self, ReferenceError> {
        let overrides: Self = serde_yml::from_str(content).map_err(|e| ReferenceError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        overrides.check()?;
        Ok(overrides)
    }

    /// Read and parse an override file
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let content = std::fs::read_to_string(path).map_err(|source| ReferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content, path)
    }

    fn check(&self) -> Result<(), ReferenceError> {
        fn non_negative(
            table: &'static str,
            key: &str,
            field: &'static str,
            value: f64,
        ) -> Result<(), ReferenceError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ReferenceError::InvalidValue {
                    table,
                    key: key.to_string(),
                    field,
                    value,
                })
            }
        }

        for (name, material) in &self.materials {
            non_negative("materials", name, "price_per_kg", material.price_per_kg)?;
            non_negative("materials", name, "density", material.density)?;
        }

        for (name, rates) in &self.processes {
            for (field, value) in rates.entries() {
                non_negative("processes", name, field, value)?;
            }
            if let Some(cycle) = rates.cycle_time {
                if cycle <= 0.0 {
                    return Err(ReferenceError::InvalidValue {
                        table: "processes",
                        key: name.clone(),
                        field: "cycle_time",
                        value: cycle,
                    });
                }
            }
        }

        Ok(())
    }
}

/// The complete set of reference tables
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    materials: BTreeMap<String, Material>,
    processes: BTreeMap<String, ProcessRates>,
    rules: RuleTable,
    components: BTreeMap<ComponentCategory, Vec<Component>>,
}

impl ReferenceTables {
    /// Built-in tables
    pub fn builtin() -> Self {
        Self {
            materials: materials::builtin_materials(),
            processes: processes::builtin_processes(),
            rules: rules::builtin_rules(),
            components: components::builtin_components(),
        }
    }

    /// Merge overrides on top of these tables
    pub fn with_overrides(mut self, overrides: ReferenceOverrides) -> Self {
        self.materials.extend(overrides.materials);
        self.processes.extend(overrides.processes);
        for (material, by_process) in overrides.rules {
            self.rules.entry(material).or_default().extend(by_process);
        }
        self
    }

    /// Built-in tables, merged with the override file when one is given
    pub fn load(override_path: Option<&Path>) -> Result<Self, ReferenceError> {
        let tables = Self::builtin();
        match override_path {
            Some(path) => {
                let overrides = ReferenceOverrides::load(path)?;
                tracing::debug!(path = %path.display(), "applied reference overrides");
                Ok(tables.with_overrides(overrides))
            }
            None => Ok(tables),
        }
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Stock price ($/kg), falling back for unknown materials
    pub fn price_per_kg(&self, material: &str) -> f64 {
        self.material(material)
            .map(|m| m.price_per_kg)
            .unwrap_or(materials::FALLBACK_PRICE_PER_KG)
    }

    /// Density (g/cm³), falling back for unknown materials
    pub fn density(&self, material: &str) -> f64 {
        self.material(material)
            .map(|m| m.density)
            .unwrap_or(materials::FALLBACK_DENSITY)
    }

    pub fn materials(&self) -> &BTreeMap<String, Material> {
        &self.materials
    }

    /// Rates for a process; unknown processes get an empty rate set
    pub fn process_rates(&self, process: &str) -> ProcessRates {
        self.processes.get(process).cloned().unwrap_or_default()
    }

    pub fn processes(&self) -> &BTreeMap<String, ProcessRates> {
        &self.processes
    }

    /// Rule set for a material/process pair, if one exists
    pub fn rules_for(&self, material: &str, process: &str) -> Option<&DfmRules> {
        self.rules.get(material).and_then(|m| m.get(process))
    }

    /// All (material, process, rules) triples in table order
    pub fn rule_sets(&self) -> impl Iterator<Item = (&str, &str, &DfmRules)> {
        self.rules.iter().flat_map(|(material, by_process)| {
            by_process
                .iter()
                .map(move |(process, rules)| (material.as_str(), process.as_str(), rules))
        })
    }

    pub fn components(&self) -> &BTreeMap<ComponentCategory, Vec<Component>> {
        &self.components
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks_for_unknown_material() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.price_per_kg("unobtainium"), 5.0);
        assert_eq!(tables.density("unobtainium"), 2.70);
        assert_eq!(tables.density("steel_mild"), 7.85);
    }

    #[test]
    fn test_unknown_process_has_empty_rates() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.process_rates("laser_cutting"), ProcessRates::default());
    }

    #[test]
    fn test_missing_rule_set_is_none() {
        let tables = ReferenceTables::builtin();
        assert!(tables.rules_for("titanium", "cnc_milling").is_none());
        assert!(tables.rules_for("aluminum_6061_t6", "cnc_milling").is_some());
    }

    #[test]
    fn test_overrides_merge_entries() {
        let yaml = r#"
materials:
  aluminum_6061_t6:
    price_per_kg: 6.10
    density: 2.70
  brass_c360:
    price_per_kg: 9.00
    density: 8.50
rules:
  titanium:
    cnc_milling:
      min_wall_thickness: 1.2
"#;
        let overrides = ReferenceOverrides::from_yaml_str(yaml, Path::new("eu.yaml")).unwrap();
        let tables = ReferenceTables::builtin().with_overrides(overrides);

        assert_eq!(tables.price_per_kg("aluminum_6061_t6"), 6.10);
        assert_eq!(tables.price_per_kg("brass_c360"), 9.00);
        assert_eq!(tables.price_per_kg("steel_mild"), 2.50);
        assert_eq!(tables.rules_for("titanium", "cnc_milling").unwrap().min_wall(), 1.2);
        // untouched combinations survive the merge
        assert!(tables.rules_for("aluminum_6061_t6", "cnc_milling").is_some());
    }

    #[test]
    fn test_overrides_reject_zero_cycle_time() {
        let yaml = "processes:\n  injection_molding:\n    cycle_time: 0\n";
        let err = ReferenceOverrides::from_yaml_str(yaml, Path::new("bad.yaml")).unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::InvalidValue { field: "cycle_time", .. }
        ));
    }

    #[test]
    fn test_overrides_reject_negative_price() {
        let yaml = "materials:\n  steel_mild:\n    price_per_kg: -1\n    density: 7.85\n";
        let err = ReferenceOverrides::from_yaml_str(yaml, Path::new("bad.yaml")).unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::InvalidValue { field: "price_per_kg", .. }
        ));
    }

    #[test]
    fn test_overrides_reject_unknown_table() {
        let yaml = "finishes:\n  anodize: {}\n";
        assert!(matches!(
            ReferenceOverrides::from_yaml_str(yaml, Path::new("bad.yaml")),
            Err(ReferenceError::Parse { .. })
        ));
    }

    #[test]
    fn test_rule_sets_iterates_all() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.rule_sets().count(), 4);
    }
}
