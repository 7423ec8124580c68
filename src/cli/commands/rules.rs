//! `partwise rules` - DFM rule sets

use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::output::print_structured;
use crate::cli::table::{CellValue, ColumnDef, Table};
use crate::cli::{OutputFormat, Session};
use crate::reference::{DfmRules, ReferenceTables};

#[derive(clap::Args, Debug)]
pub struct RulesArgs {
    /// Material of the rule set to show
    #[arg(requires = "process")]
    pub material: Option<String>,

    /// Process of the rule set to show
    pub process: Option<String>,
}

#[derive(Serialize)]
struct RuleSetEntry<'a> {
    material: &'a str,
    process: &'a str,
    #[serde(flatten)]
    rules: &'a DfmRules,
}

const LIST_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("material", 18),
    ColumnDef::new("process", 14),
    ColumnDef::new("min_wall", 9),
    ColumnDef::new("max_wall", 9),
    ColumnDef::new("min_hole", 9),
    ColumnDef::new("min_spacing", 12),
];

pub fn run(args: RulesArgs, session: &Session) -> Result<()> {
    let tables = session.tables()?;
    match (args.material, args.process) {
        (Some(material), Some(process)) => run_show(&tables, &material, &process, session.format),
        _ => run_list(&tables, session.format),
    }
}

fn run_list(tables: &ReferenceTables, format: OutputFormat) -> Result<()> {
    if format.is_structured() {
        let entries: Vec<RuleSetEntry> = tables
            .rule_sets()
            .map(|(material, process, rules)| RuleSetEntry {
                material,
                process,
                rules,
            })
            .collect();
        return print_structured(&entries, format);
    }

    let mut table = Table::new(LIST_COLUMNS);
    for (material, process, rules) in tables.rule_sets() {
        table.push(vec![
            CellValue::name(material),
            CellValue::name(process),
            CellValue::Float(rules.min_wall(), 1),
            CellValue::Float(rules.max_wall(), 1),
            CellValue::Float(rules.min_hole(), 1),
            CellValue::Float(rules.min_spacing(), 1),
        ]);
    }
    print!("{}", table.render(format)?);
    Ok(())
}

fn run_show(tables: &ReferenceTables, material: &str, process: &str, format: OutputFormat) -> Result<()> {
    let material = material.trim().to_ascii_lowercase();
    let process = process.trim().to_ascii_lowercase();
    let rules = tables.rules_for(&material, &process).ok_or_else(|| {
        miette::miette!(
            help = "Run `partwise rules` to list the available rule sets",
            "No DFM rules for {} / {}",
            material,
            process
        )
    })?;

    match format {
        format if format.is_structured() => print_structured(rules, format),
        OutputFormat::Auto => {
            println!(
                "{} {} / {}",
                style("DFM rules").bold(),
                style(&material).cyan(),
                style(&process).cyan()
            );
            for (key, value) in rules.effective_thresholds() {
                println!("   {:<28} {}", key, style(value).yellow());
            }
            Ok(())
        }
        format => {
            let mut table = Table::new(&[ColumnDef::new("threshold", 28), ColumnDef::new("value", 40)]);
            for (key, value) in rules.effective_thresholds() {
                table.push(vec![CellValue::name(key), CellValue::text(value)]);
            }
            print!("{}", table.render(format)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_set_entry_serializes_flat() {
        let tables = ReferenceTables::builtin();
        let rules = tables.rules_for("steel_mild", "cnc_milling").unwrap();
        let entry = RuleSetEntry {
            material: "steel_mild",
            process: "cnc_milling",
            rules,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["material"], "steel_mild");
        assert_eq!(json["min_wall_thickness"], 1.0);
    }
}
