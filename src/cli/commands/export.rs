//! `partwise export` - placeholder STL / STEP geometry

use console::style;
use miette::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::Session;
use crate::export::{export_to_path, ExportFormat};

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Design file (YAML or JSON)
    pub design: PathBuf,

    /// Export format: stl, step (default: from the output extension, else stl)
    #[arg(long)]
    pub to: Option<ExportFormat>,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, session: &Session) -> Result<()> {
    let loaded = session.load_design(&args.design)?;
    let format = resolve_format(args.to, args.output.as_deref());
    let geometry = &loaded.design.geometry;

    match args.output {
        Some(ref path) => {
            export_to_path(format, geometry, path)?;
            if !session.format.is_structured() {
                eprintln!(
                    "{} Exported {} to {}",
                    style("✓").green(),
                    style(&loaded.name).cyan(),
                    style(path.display()).cyan()
                );
            }
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            format.write(geometry, &loaded.name, &mut handle)?;
            handle.flush().map_err(crate::export::ExportError::from)?;
        }
    }
    Ok(())
}

/// Explicit `--to`, then the output file's extension, then STL
fn resolve_format(requested: Option<ExportFormat>, output: Option<&Path>) -> ExportFormat {
    requested
        .or_else(|| {
            output
                .and_then(|p| p.extension())
                .and_then(|ext| ext.to_str())
                .and_then(|ext| ext.parse().ok())
        })
        .unwrap_or(ExportFormat::Stl)
}
