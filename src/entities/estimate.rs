//! Cost estimates and process comparisons

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU32;

/// Named line of a cost breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostComponent {
    Material,
    Labor,
    MachineTime,
    ToolingAmortized,
    MoldAmortized,
    Overhead,
    /// Quantity discount, always negative
    VolumeDiscount,
}

impl CostComponent {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostComponent::Material => "material",
            CostComponent::Labor => "labor",
            CostComponent::MachineTime => "machine_time",
            CostComponent::ToolingAmortized => "tooling_amortized",
            CostComponent::MoldAmortized => "mold_amortized",
            CostComponent::Overhead => "overhead",
            CostComponent::VolumeDiscount => "volume_discount",
        }
    }
}

impl std::fmt::Display for CostComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-unit cost breakdown
pub type CostBreakdown = BTreeMap<CostComponent, f64>;

/// Manufacturing cost of one design by one process.
///
/// Money is rounded to cents, mass to grams, print time to a tenth of an hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub process: String,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub breakdown: CostBreakdown,
    /// Lead time range in days
    pub lead_time_days: String,
    pub best_for: String,
    pub quantity: NonZeroU32,
    pub mass_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_time_hours: Option<f64>,
    /// Full one-time mold cost ($)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mold_cost_total: Option<f64>,
}

impl CostEstimate {
    pub fn component(&self, component: CostComponent) -> Option<f64> {
        self.breakdown.get(&component).copied()
    }
}

/// Estimates for several processes, cheapest unit cost first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessComparison(pub Vec<CostEstimate>);

impl ProcessComparison {
    /// Order estimates by unit cost; equal costs keep their given order
    pub fn ranked(mut estimates: Vec<CostEstimate>) -> Self {
        estimates.sort_by(|a, b| a.unit_cost.total_cmp(&b.unit_cost));
        Self(estimates)
    }

    pub fn cheapest(&self) -> Option<&CostEstimate> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CostEstimate> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProcessComparison {
    type Item = &'a CostEstimate;
    type IntoIter = std::slice::Iter<'a, CostEstimate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
