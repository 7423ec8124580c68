//! `partwise bbox` - bounding box of a design

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::format_mm;
use crate::cli::output::print_structured;
use crate::cli::table::{CellValue, ColumnDef, Table};
use crate::cli::{OutputFormat, Session};

#[derive(clap::Args, Debug)]
pub struct BboxArgs {
    /// Design file (YAML or JSON)
    pub design: PathBuf,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("type", 10),
    ColumnDef::new("length", 10),
    ColumnDef::new("width", 10),
    ColumnDef::new("height", 10),
    ColumnDef::new("volume_mm3", 14),
];

pub fn run(args: BboxArgs, session: &Session) -> Result<()> {
    let loaded = session.load_design(&args.design)?;
    let bbox = loaded.design.geometry.bounding_box();

    match session.format {
        format if format.is_structured() => print_structured(&bbox, format),
        OutputFormat::Auto => {
            println!(
                "{} {} ({})",
                style("Bounding box").bold(),
                style(&loaded.name).cyan(),
                loaded.design.geometry.kind()
            );
            println!("   Length: {}", format_mm(bbox.length));
            println!("   Width:  {}", format_mm(bbox.width));
            println!("   Height: {}", format_mm(bbox.height));
            println!(
                "   Volume: {:.0} mm³ ({:.1} cm³)",
                bbox.volume,
                bbox.volume_cm3()
            );
            Ok(())
        }
        format => {
            let mut table = Table::new(COLUMNS);
            table.push(vec![
                CellValue::text(loaded.design.geometry.kind().to_string()),
                CellValue::Float(bbox.length, 3),
                CellValue::Float(bbox.width, 3),
                CellValue::Float(bbox.height, 3),
                CellValue::Float(bbox.volume, 3),
            ]);
            print!("{}", table.render(format)?);
            Ok(())
        }
    }
}
