//! Table formatting for list-style command output
//!
//! One `Table` renders to every non-structured format:
//! - `auto`: aligned columns with console styling
//! - `tsv`: tab-separated, no styling
//! - `csv`: RFC 4180 via the `csv` writer
//! - `md`: markdown table via `tabled`

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_money, truncate_str};
use crate::cli::OutputFormat;
use crate::entities::{DesignStatus, Severity};

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Plain text, truncated to the column width
    Text(String),
    /// Identifier (material, process, component name), cyan
    Name(String),
    /// Finding severity with color coding
    Severity(Severity),
    /// Evaluation status with color coding
    Status(DesignStatus),
    /// Dollar amount
    Money(f64),
    /// Float value with precision
    Float(f64, usize),
    /// Integer value
    Number(i64),
    /// DFM score 0-100 with color coding (≥90 green, ≥70 yellow, else red)
    Score(u8),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn name(s: impl Into<String>) -> Self {
        CellValue::Name(s.into())
    }

    /// Unstyled value, used by the machine-readable formats
    pub fn plain(&self) -> String {
        match self {
            CellValue::Text(s) | CellValue::Name(s) => s.clone(),
            CellValue::Severity(severity) => severity.to_string(),
            CellValue::Status(status) => status.to_string(),
            CellValue::Money(value) => format!("{:.2}", value),
            CellValue::Float(value, precision) => format!("{:.prec$}", value, prec = *precision),
            CellValue::Number(n) => n.to_string(),
            CellValue::Score(score) => score.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Padded, styled value for terminal output
    pub fn format_styled(&self, width: usize) -> String {
        match self {
            CellValue::Text(s) => {
                format!("{:<width$}", truncate_str(s, width.saturating_sub(2)), width = width)
            }
            CellValue::Name(s) => {
                let shown = truncate_str(s, width.saturating_sub(2));
                format!("{:<width$}", style(shown).cyan(), width = width)
            }
            CellValue::Severity(severity) => {
                let s = severity.to_string();
                let styled = match severity {
                    Severity::Critical => style(s).red().bold(),
                    Severity::Warning => style(s).yellow(),
                    Severity::Info => style(s).dim(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Status(status) => {
                let s = status.to_string();
                let styled = match status {
                    DesignStatus::Validated => style(s).green(),
                    DesignStatus::Draft => style(s).yellow(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Money(value) => format!("{:>width$}", format_money(*value), width = width),
            CellValue::Float(value, precision) => {
                format!("{:>width$.prec$}", value, width = width, prec = *precision)
            }
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
            CellValue::Score(score) => {
                let styled = if *score >= 90 {
                    style(score.to_string()).green()
                } else if *score >= 70 {
                    style(score.to_string()).yellow()
                } else {
                    style(score.to_string()).red()
                };
                format!("{:>width$}", styled, width = width)
            }
            CellValue::Empty => format!("{:<width$}", style("-").dim(), width = width),
        }
    }

    /// Markdown cell (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        match self {
            CellValue::Money(value) => format_money(*value),
            CellValue::Empty => "-".to_string(),
            other => other.plain().replace('|', "\\|"),
        }
    }
}

/// Column definition for table output
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(header: &'static str, width: usize) -> Self {
        Self { header, width }
    }
}

/// Rows of typed cells under a fixed set of columns
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<ColumnDef>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: &[ColumnDef]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render for a table format. Structured formats fall back to aligned text.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Tsv => Ok(self.render_tsv()),
            OutputFormat::Csv => self.render_csv(),
            OutputFormat::Md => Ok(self.render_md()),
            _ => Ok(self.render_styled()),
        }
    }

    fn render_styled(&self) -> String {
        let mut out = String::new();
        let header: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{:<width$}", c.header.to_uppercase(), width = c.width))
            .collect();
        out.push_str(&style(header.join(" ").trim_end()).bold().to_string());
        out.push('\n');

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&"-".repeat(total.saturating_sub(1)));
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&self.columns)
                .map(|(cell, column)| cell.format_styled(column.width))
                .collect();
            out.push_str(cells.join(" ").trim_end());
            out.push('\n');
        }
        out
    }

    fn render_tsv(&self) -> String {
        let mut out = String::new();
        let header: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        out.push_str(&header.join("\t"));
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.plain().replace(['\t', '\n'], " "))
                .collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        out
    }

    fn render_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(self.columns.iter().map(|c| c.header))
            .into_diagnostic()?;
        for row in &self.rows {
            writer
                .write_record(row.iter().map(CellValue::plain))
                .into_diagnostic()?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| miette::miette!("Failed to write CSV: {}", e.error()))?;
        String::from_utf8(bytes).into_diagnostic()
    }

    fn render_md(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.columns.iter().map(|c| c.header.to_string()));
        for row in &self.rows {
            builder.push_record(row.iter().map(CellValue::format_md));
        }
        let mut out = builder.build().with(Style::markdown()).to_string();
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(&[
            ColumnDef::new("process", 20),
            ColumnDef::new("unit_cost", 10),
        ]);
        table.push(vec![CellValue::name("cnc_milling"), CellValue::Money(21.52)]);
        table.push(vec![CellValue::name("a,b"), CellValue::Money(6.5)]);
        table
    }

    #[test]
    fn test_tsv_is_plain() {
        let out = sample().render(OutputFormat::Tsv).unwrap();
        assert_eq!(out, "process\tunit_cost\ncnc_milling\t21.52\na,b\t6.50\n");
    }

    #[test]
    fn test_csv_quotes_commas() {
        let out = sample().render(OutputFormat::Csv).unwrap();
        assert_eq!(out, "process,unit_cost\ncnc_milling,21.52\n\"a,b\",6.50\n");
    }

    #[test]
    fn test_markdown_has_header_separator() {
        let out = sample().render(OutputFormat::Md).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("process"));
        assert!(lines[1].starts_with("|-"));
        assert!(lines[2].contains("$21.52"));
    }

    #[test]
    fn test_md_escapes_pipes() {
        assert_eq!(CellValue::text("a|b").format_md(), "a\\|b");
    }
}
