//! CLI command implementations, one module per subcommand

pub mod bbox;
pub mod check;
pub mod completions;
pub mod config;
pub mod cost;
pub mod eval;
pub mod export;
pub mod parts;
pub mod rules;
pub mod schema;
