//! DFM validation results

use serde::{Deserialize, Serialize};

use crate::core::round::round_to;

/// How much a finding matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the design
    Critical,
    /// Lowers confidence but does not block
    Warning,
    /// Advisory only
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Which check produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    WallThickness,
    HoleDiameter,
    HoleSpacing,
    EdgeDistance,
    MissingRules,
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FindingKind::WallThickness => write!(f, "wall_thickness"),
            FindingKind::HoleDiameter => write!(f, "hole_diameter"),
            FindingKind::HoleSpacing => write!(f, "hole_spacing"),
            FindingKind::EdgeDistance => write!(f, "edge_distance"),
            FindingKind::MissingRules => write!(f, "missing_rules"),
        }
    }
}

/// One manufacturability observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
}

impl Finding {
    pub fn new(kind: FindingKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            recommendation: None,
            current_value: None,
        }
    }

    pub fn critical(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Critical, message)
    }

    pub fn warning(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    pub fn suggestion(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Info, message)
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    pub fn with_current_value(mut self, value: f64) -> Self {
        self.current_value = Some(value);
        self
    }
}

/// Confidence lost per critical issue
pub const ISSUE_PENALTY: f64 = 0.2;
/// Confidence lost per warning
pub const WARNING_PENALTY: f64 = 0.1;
/// Confidence reported when no rule set applies
pub const UNRULED_CONFIDENCE: f64 = 0.5;

/// Outcome of validating one design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when there are no critical issues
    pub valid: bool,
    pub issues: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub suggestions: Vec<Finding>,
    /// Heuristic in [0, 1]
    pub confidence: f64,
    /// round(confidence × 100)
    pub dfm_score: u8,
}

impl ValidationResult {
    /// Assemble a result, scoring it from the finding counts
    pub fn from_findings(issues: Vec<Finding>, warnings: Vec<Finding>, suggestions: Vec<Finding>) -> Self {
        let raw = 1.0 - issues.len() as f64 * ISSUE_PENALTY - warnings.len() as f64 * WARNING_PENALTY;
        Self::scored(issues, warnings, suggestions, raw)
    }

    /// Low-confidence pass for a design no rule set covers
    pub fn unruled(warning: Finding) -> Self {
        Self::scored(Vec::new(), vec![warning], Vec::new(), UNRULED_CONFIDENCE)
    }

    /// Result-assembly rounding point: confidence is clamped and rounded to
    /// 2 places once, and the score is derived from the rounded value.
    fn scored(issues: Vec<Finding>, warnings: Vec<Finding>, suggestions: Vec<Finding>, raw: f64) -> Self {
        let confidence = round_to(raw.clamp(0.0, 1.0), 2);
        Self {
            valid: issues.is_empty(),
            issues,
            warnings,
            suggestions,
            confidence,
            dfm_score: (confidence * 100.0).round() as u8,
        }
    }

    /// All findings, most severe first
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.issues
            .iter()
            .chain(self.warnings.iter())
            .chain(self.suggestions.iter())
    }
}
