//! Manufacturing process rate parameters and cost-model selection

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Process used when a design does not name one
pub const DEFAULT_PROCESS: &str = "cnc_milling";

/// Rate parameters for one manufacturing process.
///
/// Every field is optional: a process only carries the rates its cost model
/// consults, and each cost formula supplies its own default for anything
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessRates {
    /// Operator labor rate ($/hour)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labor_rate: Option<f64>,

    /// Machine time rate ($/hour)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_rate: Option<f64>,

    /// Overhead as a fraction of direct cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overhead_rate: Option<f64>,

    /// One-time tooling cost amortized over the batch ($)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooling_base: Option<f64>,

    /// Processing minutes per cm³ of stock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_per_cm3: Option<f64>,

    /// Setup minutes per part
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_time: Option<f64>,

    /// Molding cycle time (seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_time: Option<f64>,

    /// One-time mold cost ($)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mold_cost: Option<f64>,

    /// Extra material/time multiplier for support structures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_factor: Option<f64>,

    /// Cutting minutes per linear cm (sheet metal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutting_time: Option<f64>,

    /// Minutes per bend (sheet metal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bending_time: Option<f64>,
}

impl ProcessRates {
    /// All populated rates as (name, value) pairs, in declaration order
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        [
            ("labor_rate", self.labor_rate),
            ("machine_rate", self.machine_rate),
            ("overhead_rate", self.overhead_rate),
            ("tooling_base", self.tooling_base),
            ("time_per_cm3", self.time_per_cm3),
            ("setup_time", self.setup_time),
            ("cycle_time", self.cycle_time),
            ("mold_cost", self.mold_cost),
            ("support_factor", self.support_factor),
            ("cutting_time", self.cutting_time),
            ("bending_time", self.bending_time),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

/// Cost formula family.
///
/// Process names are open-ended data; the formulas are not. Any process
/// without a dedicated formula is costed as CNC milling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    CncMilling,
    #[serde(rename = "3d_printing")]
    AdditivePrinting,
    InjectionMolding,
}

impl CostModel {
    /// Processes compared by default, in tie-break order
    pub const ALL: [CostModel; 3] = [
        CostModel::CncMilling,
        CostModel::AdditivePrinting,
        CostModel::InjectionMolding,
    ];

    /// Select the formula for a process name (case-insensitive, CNC by default)
    pub fn for_process(process: &str) -> Self {
        match process.trim().to_ascii_lowercase().as_str() {
            "3d_printing" => CostModel::AdditivePrinting,
            "injection_molding" => CostModel::InjectionMolding,
            _ => CostModel::CncMilling,
        }
    }

    /// Canonical process name for this formula
    pub fn process_name(&self) -> &'static str {
        match self {
            CostModel::CncMilling => "cnc_milling",
            CostModel::AdditivePrinting => "3d_printing",
            CostModel::InjectionMolding => "injection_molding",
        }
    }
}

impl std::fmt::Display for CostModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.process_name())
    }
}

/// Load the built-in process rate table
pub fn builtin_processes() -> BTreeMap<String, ProcessRates> {
    let mut db = BTreeMap::new();

    db.insert(
        "cnc_milling".to_string(),
        ProcessRates {
            labor_rate: Some(16.0),
            overhead_rate: Some(0.25),
            tooling_base: Some(50.0),
            time_per_cm3: Some(0.5),
            setup_time: Some(15.0),
            ..Default::default()
        },
    );

    db.insert(
        "3d_printing".to_string(),
        ProcessRates {
            machine_rate: Some(8.0),
            overhead_rate: Some(0.15),
            time_per_cm3: Some(2.0),
            support_factor: Some(1.4),
            ..Default::default()
        },
    );

    db.insert(
        "injection_molding".to_string(),
        ProcessRates {
            mold_cost: Some(5000.0),
            cycle_time: Some(30.0),
            labor_rate: Some(12.0),
            overhead_rate: Some(0.20),
            ..Default::default()
        },
    );

    db.insert(
        "sheet_metal".to_string(),
        ProcessRates {
            labor_rate: Some(14.0),
            overhead_rate: Some(0.22),
            cutting_time: Some(0.3),
            bending_time: Some(2.0),
            ..Default::default()
        },
    );

    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_model_selection() {
        assert_eq!(CostModel::for_process("3d_printing"), CostModel::AdditivePrinting);
        assert_eq!(CostModel::for_process("Injection_Molding"), CostModel::InjectionMolding);
        assert_eq!(CostModel::for_process("cnc_milling"), CostModel::CncMilling);
        assert_eq!(CostModel::for_process("sheet_metal"), CostModel::CncMilling);
        assert_eq!(CostModel::for_process(""), CostModel::CncMilling);
    }

    #[test]
    fn test_rate_entries_skip_missing() {
        let processes = builtin_processes();
        let entries = processes["3d_printing"].entries();
        assert_eq!(
            entries,
            vec![
                ("machine_rate", 8.0),
                ("overhead_rate", 0.15),
                ("time_per_cm3", 2.0),
                ("support_factor", 1.4),
            ]
        );
    }

    #[test]
    fn test_cost_model_serialization() {
        let json = serde_json::to_string(&CostModel::AdditivePrinting).unwrap();
        assert_eq!(json, "\"3d_printing\"");
    }
}
