//! `partwise cost` - manufacturing cost estimate and process comparison

use console::style;
use miette::Result;
use serde::Serialize;
use std::num::NonZeroU32;
use std::path::PathBuf;

use crate::cli::helpers::format_money;
use crate::cli::output::print_structured;
use crate::cli::table::{CellValue, ColumnDef, Table};
use crate::cli::{OutputFormat, Session};
use crate::core::CostEstimator;
use crate::entities::{CostEstimate, ProcessComparison};

#[derive(clap::Args, Debug)]
pub struct CostArgs {
    /// Design file (YAML or JSON)
    pub design: PathBuf,

    /// Production quantity (default: the design's quantity, then config)
    #[arg(long, short = 'n')]
    pub quantity: Option<NonZeroU32>,

    /// Cost with this process instead of the design's own
    #[arg(long, short = 'p')]
    pub process: Option<String>,

    /// Also compare every process family
    #[arg(long)]
    pub compare: bool,
}

#[derive(Serialize)]
struct CostReport<'a> {
    estimate: &'a CostEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<&'a ProcessComparison>,
}

const BREAKDOWN_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("component", 20),
    ColumnDef::new("amount", 12),
];

const COMPARISON_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("process", 20),
    ColumnDef::new("unit_cost", 12),
    ColumnDef::new("total_cost", 14),
    ColumnDef::new("lead_time_days", 28),
    ColumnDef::new("best_for", 40),
];

pub fn run(args: CostArgs, session: &Session) -> Result<()> {
    let loaded = session.load_design(&args.design)?;
    let tables = session.tables()?;
    let quantity = session.quantity(args.quantity, loaded.quantity);

    let design = match args.process.as_deref().map(str::trim) {
        Some(process) if !process.is_empty() => {
            loaded.design.with_process(&process.to_ascii_lowercase())
        }
        _ => loaded.design.clone(),
    };

    let estimator = CostEstimator::new(&tables);
    let bbox = design.geometry.bounding_box();
    let estimate = estimator.estimate(&design, &bbox, quantity);
    let comparison = args
        .compare
        .then(|| estimator.compare(&design, &bbox, quantity));

    match session.format {
        format if format.is_structured() => print_structured(
            &CostReport {
                estimate: &estimate,
                comparison: comparison.as_ref(),
            },
            format,
        ),
        OutputFormat::Auto => {
            print_estimate(&loaded.name, &design.material, &estimate);
            if let Some(ref comparison) = comparison {
                println!();
                println!("   {}", style("Process comparison").bold());
                print!("{}", comparison_table(comparison).render(OutputFormat::Auto)?);
            }
            Ok(())
        }
        format => {
            let table = match comparison {
                Some(ref comparison) => comparison_table(comparison),
                None => breakdown_table(&estimate),
            };
            print!("{}", table.render(format)?);
            Ok(())
        }
    }
}

fn print_estimate(name: &str, material: &str, estimate: &CostEstimate) {
    println!(
        "{} {} in {} by {} × {}",
        style("$").green(),
        style(name).cyan(),
        style(material).yellow(),
        style(&estimate.process).yellow(),
        estimate.quantity
    );
    println!();
    println!("   Unit cost:  {}", style(format_money(estimate.unit_cost)).bold());
    println!("   Total cost: {}", format_money(estimate.total_cost));
    println!("   Mass:       {:.3} kg", estimate.mass_kg);
    if let Some(hours) = estimate.print_time_hours {
        println!("   Print time: {:.1} h", hours);
    }
    if let Some(mold) = estimate.mold_cost_total {
        println!("   Mold cost:  {} (one-time)", format_money(mold));
    }
    println!("   Lead time:  {} days", estimate.lead_time_days);
    println!("   Best for:   {}", style(&estimate.best_for).dim());
    println!();
    println!("   {}", style("Breakdown (per unit)").bold());
    for (component, amount) in &estimate.breakdown {
        println!("     {:<18} {:>10}", component.as_str(), format_money(*amount));
    }
}

fn breakdown_table(estimate: &CostEstimate) -> Table {
    let mut table = Table::new(BREAKDOWN_COLUMNS);
    for (component, amount) in &estimate.breakdown {
        table.push(vec![
            CellValue::name(component.as_str()),
            CellValue::Money(*amount),
        ]);
    }
    table.push(vec![CellValue::name("unit_cost"), CellValue::Money(estimate.unit_cost)]);
    table
}

fn comparison_table(comparison: &ProcessComparison) -> Table {
    let mut table = Table::new(COMPARISON_COLUMNS);
    for estimate in comparison {
        table.push(vec![
            CellValue::name(estimate.process.clone()),
            CellValue::Money(estimate.unit_cost),
            CellValue::Money(estimate.total_cost),
            CellValue::text(estimate.lead_time_days.clone()),
            CellValue::text(estimate.best_for.clone()),
        ]);
    }
    table
}
