//! `partwise parts` - standard component catalog

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::output::print_structured;
use crate::cli::table::{CellValue, ColumnDef, Table};
use crate::cli::{OutputFormat, Session};
use crate::core::{CatalogMatch, ComponentCatalog};
use crate::reference::{Component, ComponentCategory};

#[derive(Subcommand, Debug)]
pub enum PartsCommands {
    /// List component categories
    Categories,

    /// List every component in a category
    List(ListArgs),

    /// Search component names (case-insensitive substring)
    Search(SearchArgs),

    /// Show one component
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Category (nema_motors, metric_bolts, bearings, connectors)
    pub category: String,
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Text to look for in component names
    pub query: String,

    /// Only search this category
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Category
    pub category: String,

    /// Component name (e.g. NEMA17, M5, 608)
    pub name: String,
}

const COMPONENT_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("category", 14),
    ColumnDef::new("name", 14),
    ColumnDef::new("attributes", 80),
];

pub fn run(cmd: PartsCommands, session: &Session) -> Result<()> {
    let tables = session.tables()?;
    let catalog = ComponentCatalog::new(&tables);

    match cmd {
        PartsCommands::Categories => run_categories(&catalog, session.format),
        PartsCommands::List(args) => run_list(&catalog, args, session.format),
        PartsCommands::Search(args) => run_search(&catalog, args, session.format),
        PartsCommands::Show(args) => run_show(&catalog, args, session.format),
    }
}

fn run_categories(catalog: &ComponentCatalog, format: OutputFormat) -> Result<()> {
    let categories = catalog.categories();
    if format.is_structured() {
        return print_structured(&categories, format);
    }

    let mut table = Table::new(&[ColumnDef::new("category", 14), ColumnDef::new("count", 6)]);
    for category in categories {
        table.push(vec![
            CellValue::name(category.as_str()),
            CellValue::Number(catalog.list(category.as_str()).len() as i64),
        ]);
    }
    print!("{}", table.render(format)?);
    Ok(())
}

fn run_list(catalog: &ComponentCatalog, args: ListArgs, format: OutputFormat) -> Result<()> {
    let category: ComponentCategory = args
        .category
        .parse()
        .map_err(|e: String| miette::miette!("{}", e))?;
    let components = catalog.list(category.as_str());

    if format.is_structured() {
        return print_structured(&components, format);
    }

    let matches: Vec<CatalogMatch> = components
        .iter()
        .map(|component| CatalogMatch { category, component })
        .collect();
    print!("{}", component_table(&matches).render(format)?);
    Ok(())
}

fn run_search(catalog: &ComponentCatalog, args: SearchArgs, format: OutputFormat) -> Result<()> {
    let matches = catalog.search(&args.query, args.category.as_deref());

    if format.is_structured() {
        return print_structured(&matches, format);
    }

    if matches.is_empty() && format == OutputFormat::Auto {
        println!(
            "{} No components match '{}'",
            style("ℹ").blue(),
            style(&args.query).yellow()
        );
        return Ok(());
    }

    print!("{}", component_table(&matches).render(format)?);
    if format == OutputFormat::Auto {
        println!();
        println!("{} component(s) found", style(matches.len()).cyan());
    }
    Ok(())
}

fn run_show(catalog: &ComponentCatalog, args: ShowArgs, format: OutputFormat) -> Result<()> {
    let component = catalog.get(&args.category, &args.name).ok_or_else(|| {
        miette::miette!(
            help = "Run `partwise parts list <category>` to see available names",
            "No component '{}' in category '{}'",
            args.name,
            args.category
        )
    })?;

    match format {
        format if format.is_structured() => print_structured(component, format),
        OutputFormat::Auto => {
            print_component(component);
            Ok(())
        }
        format => {
            let mut table = Table::new(&[ColumnDef::new("attribute", 16), ColumnDef::new("value", 24)]);
            table.push(vec![CellValue::name("name"), CellValue::text(component.name.clone())]);
            for (key, value) in component.spec.attributes() {
                table.push(vec![CellValue::name(key), CellValue::text(value)]);
            }
            print!("{}", table.render(format)?);
            Ok(())
        }
    }
}

fn print_component(component: &Component) {
    println!("{}", style(&component.name).bold());
    for (key, value) in component.spec.attributes() {
        println!("   {:<16} {}", style(key).cyan(), value);
    }
}

fn component_table(matches: &[CatalogMatch]) -> Table {
    let mut table = Table::new(COMPONENT_COLUMNS);
    for found in matches {
        table.push(vec![
            CellValue::text(found.category.as_str()),
            CellValue::name(found.component.name.clone()),
            CellValue::text(found.component.summary()),
        ]);
    }
    table
}
