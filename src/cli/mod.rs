//! CLI module - argument parsing, shared session state, and output

pub mod args;
pub mod commands;
pub mod helpers;
pub mod output;
pub mod session;
pub mod table;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
pub use session::{LoadedDesign, Session};
