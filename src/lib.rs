//! Partwise: parametric part evaluation
//!
//! Takes a parametric mechanical part design (a YAML or JSON document),
//! derives its bounding box, checks it against design-for-manufacturing
//! rules for its material and process, and estimates manufacturing cost
//! for one process or all of them.
//!
//! ```
//! use partwise::core::Pipeline;
//! use partwise::entities::{Design, DEFAULT_QUANTITY};
//! use partwise::reference::ReferenceTables;
//!
//! let tables = ReferenceTables::builtin();
//! let evaluation = Pipeline::new(&tables).evaluate(&Design::default(), DEFAULT_QUANTITY);
//! assert!(evaluation.validation.valid);
//! ```

pub mod cli;
pub mod core;
pub mod entities;
pub mod export;
pub mod reference;
pub mod schema;
pub mod yaml;
