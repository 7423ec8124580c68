//! Full evaluation record for one design

use serde::{Deserialize, Serialize};

use crate::entities::estimate::{CostEstimate, ProcessComparison};
use crate::entities::geometry::BoundingBox;
use crate::entities::validation::ValidationResult;

/// Lifecycle status of an evaluated design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignStatus {
    /// Has critical DFM issues
    Draft,
    /// Passed DFM validation
    Validated,
}

impl DesignStatus {
    pub fn from_validation(validation: &ValidationResult) -> Self {
        if validation.valid {
            DesignStatus::Validated
        } else {
            DesignStatus::Draft
        }
    }
}

impl std::fmt::Display for DesignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesignStatus::Draft => write!(f, "draft"),
            DesignStatus::Validated => write!(f, "validated"),
        }
    }
}

/// Flat result of running a design through every engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Source label (usually the file path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub status: DesignStatus,
    pub bounding_box: BoundingBox,
    pub validation: ValidationResult,
    pub cost_estimate: CostEstimate,
    pub process_comparison: ProcessComparison,
}

impl Evaluation {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
