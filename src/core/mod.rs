//! Core module - evaluation engines and shared infrastructure

pub mod catalog;
pub mod config;
pub mod cost;
pub mod dfm;
pub mod logging;
pub mod pipeline;
pub mod round;

pub use catalog::{CatalogMatch, ComponentCatalog};
pub use config::Config;
pub use cost::CostEstimator;
pub use dfm::DfmValidator;
pub use logging::{LogSettings, LoggingError};
pub use pipeline::Pipeline;
