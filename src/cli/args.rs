//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    bbox::BboxArgs, check::CheckArgs, completions::CompletionsArgs, config::ConfigCommands,
    cost::CostArgs, eval::EvalArgs, export::ExportArgs, parts::PartsCommands, rules::RulesArgs,
    schema::SchemaArgs,
};

#[derive(Parser)]
#[command(name = "partwise")]
#[command(author, version, about = "Parametric part design checks and cost estimates")]
#[command(long_about = "Validate parametric mechanical part designs against design-for-manufacturing rules, \
estimate their manufacturing cost, and compare processes. Designs are plain YAML or JSON files.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Reference override file (materials, process rates, DFM rules)
    #[arg(long, global = true, value_name = "FILE")]
    pub reference: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the bounding box of a design
    Bbox(BboxArgs),

    /// Check a design against DFM rules
    Check(CheckArgs),

    /// Estimate manufacturing cost
    Cost(CostArgs),

    /// Run the full evaluation over design files or directories
    Eval(EvalArgs),

    /// Browse the standard component catalog
    #[command(subcommand)]
    Parts(PartsCommands),

    /// List DFM rule sets or show one rule set's thresholds
    Rules(RulesArgs),

    /// Export placeholder CAD geometry (STL or STEP)
    Export(ExportArgs),

    /// Print the design document JSON schema
    Schema(SchemaArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled text and tables for the terminal
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}

impl OutputFormat {
    /// YAML and JSON print the full record instead of a table
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputFormat::Yaml | OutputFormat::Json)
    }
}
