//! Entity type definitions
//!
//! **Input:**
//! - [`DesignParameters`] - structured design record, every field optional
//! - [`Design`] - the same record after defaults and validation
//! - [`Geometry`] - typed shape plus wall thickness
//!
//! **Results:**
//! - [`BoundingBox`] - part envelope and volume
//! - [`ValidationResult`] - DFM findings with a confidence score
//! - [`CostEstimate`] / [`ProcessComparison`] - per-process cost breakdowns
//! - [`Evaluation`] - everything above for one design

pub mod design;
pub mod estimate;
pub mod evaluation;
pub mod geometry;
pub mod validation;

pub use design::{
    Design, DesignDocument, DesignError, DesignParameters, Feature, GeometryParameters, MountingPattern,
    MountingPatternParameters, Tolerances, DEFAULT_QUANTITY,
};
pub use estimate::{CostBreakdown, CostComponent, CostEstimate, ProcessComparison};
pub use evaluation::{DesignStatus, Evaluation};
pub use geometry::{bounding_box, BoundingBox, Geometry, GeometryKind, Shape};
pub use validation::{Finding, FindingKind, Severity, ValidationResult};
