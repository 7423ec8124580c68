//! Placeholder geometry export
//!
//! Without a solid kernel the exported part is its bounding box: a closed
//! 12-triangle mesh for STL, a header-only shell for STEP. Both carry the
//! extents exactly.

pub mod step;
pub mod stl;

pub use step::write_step_shell;
pub use stl::write_box_stl;

use miette::Diagnostic;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::entities::Geometry;

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", path.display())]
    #[diagnostic(code(partwise::export::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write export: {0}")]
    #[diagnostic(code(partwise::export::stream))]
    Stream(#[from] std::io::Error),
}

/// Interchange format for exported geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Stl,
    Step,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Stl => "stl",
            ExportFormat::Step => "step",
        }
    }

    /// Write `geometry` in this format
    pub fn write<W: Write>(&self, geometry: &Geometry, name: &str, writer: W) -> Result<(), ExportError> {
        match self {
            ExportFormat::Stl => write_box_stl(geometry, name, writer),
            ExportFormat::Step => write_step_shell(geometry, name, writer),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stl" => Ok(ExportFormat::Stl),
            "step" | "stp" => Ok(ExportFormat::Step),
            _ => Err(format!("Invalid export format: {}. Use stl or step", s)),
        }
    }
}

/// Export geometry to a file
pub fn export_to_path(format: ExportFormat, geometry: &Geometry, path: &Path) -> Result<(), ExportError> {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| geometry.kind().to_string());
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    format.write(geometry, &name, &mut writer)?;
    writer.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), %format, "exported geometry");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_parse() {
        assert_eq!("STL".parse::<ExportFormat>().unwrap(), ExportFormat::Stl);
        assert_eq!("stp".parse::<ExportFormat>().unwrap(), ExportFormat::Step);
        assert!("obj".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_to_path_writes_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("housing.stl");
        export_to_path(ExportFormat::Stl, &Geometry::default(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("solid housing\n"));
        assert!(content.trim_end().ends_with("endsolid housing"));
    }

    #[test]
    fn test_export_to_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("part.step");
        let err = export_to_path(ExportFormat::Step, &Geometry::default(), &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
