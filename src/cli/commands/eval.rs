//! `partwise eval` - full evaluation over many design files
//!
//! Directories are walked recursively for `.yaml`, `.yml` and `.json`
//! files (hidden files such as `.partwise.yaml` are skipped). Files are
//! loaded in order, then evaluated in parallel.

use console::style;
use miette::{IntoDiagnostic, Result};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cli::helpers::plural;
use crate::cli::output::print_structured;
use crate::cli::table::{CellValue, ColumnDef, Table};
use crate::cli::{OutputFormat, Session};
use crate::core::Pipeline;
use crate::entities::{Design, DesignStatus, Evaluation};
use crate::yaml::is_design_file;

#[derive(clap::Args, Debug)]
pub struct EvalArgs {
    /// Design files or directories
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Production quantity for every design (default: each design's quantity, then config)
    #[arg(long, short = 'n')]
    pub quantity: Option<NonZeroU32>,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("source", 32),
    ColumnDef::new("status", 10),
    ColumnDef::new("score", 6),
    ColumnDef::new("process", 18),
    ColumnDef::new("unit_cost", 11),
    ColumnDef::new("total_cost", 12),
    ColumnDef::new("cheapest", 18),
];

pub fn run(args: EvalArgs, session: &Session) -> Result<()> {
    let files = collect_design_files(&args.paths)?;
    if files.is_empty() {
        return Err(miette::miette!(
            help = "Pass .yaml, .yml or .json design files, or directories containing them",
            "No design files found"
        ));
    }

    let mut sources = Vec::with_capacity(files.len());
    let mut jobs: Vec<(Design, NonZeroU32)> = Vec::with_capacity(files.len());
    for path in &files {
        let loaded = session.load_design(path)?;
        let quantity = session.quantity(args.quantity, loaded.quantity);
        sources.push(path.display().to_string());
        jobs.push((loaded.design, quantity));
    }

    let tables = session.tables()?;
    let evaluations: Vec<Evaluation> = Pipeline::new(&tables)
        .evaluate_batch(&jobs)
        .into_iter()
        .zip(sources)
        .map(|(evaluation, source)| evaluation.with_source(source))
        .collect();

    match session.format {
        format if format.is_structured() => print_structured(&evaluations, format),
        OutputFormat::Auto => {
            print!("{}", summary_table(&evaluations).render(OutputFormat::Auto)?);
            let validated = evaluations
                .iter()
                .filter(|e| e.status == DesignStatus::Validated)
                .count();
            println!();
            println!(
                "{} {} evaluated, {} validated",
                style("✓").green(),
                plural(evaluations.len(), "design"),
                validated
            );
            Ok(())
        }
        format => {
            print!("{}", summary_table(&evaluations).render(format)?);
            Ok(())
        }
    }
}

/// Expand files and directories into a list of design files.
///
/// Explicit file arguments are kept as given; directory contents are sorted
/// by name.
pub fn collect_design_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.into_diagnostic()?;
                if entry.file_type().is_file() && is_design_file(entry.path()) && !is_hidden(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    tracing::debug!(count = files.len(), "collected design files");
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn summary_table(evaluations: &[Evaluation]) -> Table {
    let mut table = Table::new(COLUMNS);
    for evaluation in evaluations {
        let cheapest = evaluation
            .process_comparison
            .cheapest()
            .map(|e| CellValue::name(e.process.clone()))
            .unwrap_or(CellValue::Empty);
        table.push(vec![
            CellValue::text(evaluation.source.clone().unwrap_or_default()),
            CellValue::Status(evaluation.status),
            CellValue::Score(evaluation.validation.dfm_score),
            CellValue::name(evaluation.cost_estimate.process.clone()),
            CellValue::Money(evaluation.cost_estimate.unit_cost),
            CellValue::Money(evaluation.cost_estimate.total_cost),
            cheapest,
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_walks_directories_sorted() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("brackets");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join("b.yaml"), "").unwrap();
        std::fs::write(tmp.path().join("a.json"), "{}").unwrap();
        std::fs::write(nested.join("c.yml"), "").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "").unwrap();
        std::fs::write(tmp.path().join(".partwise.yaml"), "").unwrap();

        let files = collect_design_files(&[tmp.path().to_path_buf()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.yaml", "brackets/c.yml"]);
    }

    #[test]
    fn test_explicit_files_kept() {
        let files = collect_design_files(&[PathBuf::from("z.yaml"), PathBuf::from("a.yaml")]).unwrap();
        assert_eq!(files, vec![PathBuf::from("z.yaml"), PathBuf::from("a.yaml")]);
    }
}
