//! `partwise check` - DFM validation of one design

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::plural;
use crate::cli::output::print_structured;
use crate::cli::table::{CellValue, ColumnDef, Table};
use crate::cli::{OutputFormat, Session};
use crate::core::DfmValidator;
use crate::entities::{Finding, Severity, ValidationResult};

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Design file (YAML or JSON)
    pub design: PathBuf,

    /// Exit with an error when the design has critical issues
    #[arg(long)]
    pub strict: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("severity", 10),
    ColumnDef::new("type", 16),
    ColumnDef::new("message", 60),
    ColumnDef::new("recommendation", 40),
];

pub fn run(args: CheckArgs, session: &Session) -> Result<()> {
    let loaded = session.load_design(&args.design)?;
    let tables = session.tables()?;
    let result = DfmValidator::new(&tables).validate(&loaded.design);

    match session.format {
        format if format.is_structured() => print_structured(&result, format)?,
        OutputFormat::Auto => {
            println!(
                "{} Checking {} ({} / {})",
                style("⚙").cyan(),
                style(&loaded.name).cyan(),
                style(&loaded.design.material).yellow(),
                style(&loaded.design.process).yellow()
            );
            println!();
            print_findings(&result);
            print_summary(&result);
        }
        format => print!("{}", findings_table(&result).render(format)?),
    }

    if args.strict && !result.valid {
        return Err(miette::miette!(
            help = "Fix the critical issues above or run without --strict",
            "{} has {}",
            args.design.display(),
            plural(result.issues.len(), "critical issue")
        ));
    }
    Ok(())
}

fn findings_table(result: &ValidationResult) -> Table {
    let mut table = Table::new(COLUMNS);
    for finding in result.findings() {
        table.push(vec![
            CellValue::Severity(finding.severity),
            CellValue::text(finding.kind.to_string()),
            CellValue::text(finding.message.clone()),
            finding
                .recommendation
                .clone()
                .map(CellValue::Text)
                .unwrap_or(CellValue::Empty),
        ]);
    }
    table
}

fn print_findings(result: &ValidationResult) {
    if result.findings().next().is_none() {
        println!("   {} No findings", style("✓").green());
        return;
    }
    for finding in result.findings() {
        print_finding(finding);
    }
}

fn print_finding(finding: &Finding) {
    let marker = match finding.severity {
        Severity::Critical => style("✗").red().bold(),
        Severity::Warning => style("⚠").yellow(),
        Severity::Info => style("ℹ").blue(),
    };
    println!("   {} {}", marker, finding.message);
    if let Some(ref recommendation) = finding.recommendation {
        println!("     {} {}", style("→").dim(), style(recommendation).dim());
    }
}

fn print_summary(result: &ValidationResult) {
    println!();
    let verdict = if result.valid {
        style("valid").green().bold()
    } else {
        style("invalid").red().bold()
    };
    println!(
        "   Result: {}  ({}, {}, {})",
        verdict,
        plural(result.issues.len(), "issue"),
        plural(result.warnings.len(), "warning"),
        plural(result.suggestions.len(), "suggestion")
    );
    println!(
        "   DFM score: {}  (confidence {:.2})",
        style(result.dfm_score).bold(),
        result.confidence
    );
}
