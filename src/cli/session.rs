//! Per-invocation state shared by every command
//!
//! A session resolves the effective configuration, output format and
//! reference tables once, and loads design files through the same
//! parse → schema check → normalize sequence for every command.

use clap::ValueEnum;
use miette::Result;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::Design;
use crate::reference::ReferenceTables;
use crate::schema::Validator;
use crate::yaml;

/// A design file after loading and normalization
#[derive(Debug, Clone)]
pub struct LoadedDesign {
    pub path: PathBuf,
    /// `name` from the document, else the file stem
    pub name: String,
    /// `quantity` from the document
    pub quantity: Option<NonZeroU32>,
    pub design: Design,
}

/// Effective settings for one command run
pub struct Session {
    pub config: Config,
    pub format: OutputFormat,
    reference: Option<PathBuf>,
    schema: Validator,
}

impl Session {
    /// Resolve flags over configuration. Flags win; an `auto` format defers
    /// to the configured default.
    pub fn new(global: &GlobalOpts, config: Config) -> Self {
        let format = match (global.format, config.default_format.as_deref()) {
            (OutputFormat::Auto, Some(configured)) => OutputFormat::from_str(configured, true)
                .unwrap_or_else(|_| {
                    tracing::warn!(format = configured, "unknown default_format in config, using auto");
                    OutputFormat::Auto
                }),
            (format, _) => format,
        };
        let reference = global
            .reference
            .clone()
            .or_else(|| config.reference_file.clone());

        Self {
            config,
            format,
            reference,
            schema: Validator::default(),
        }
    }

    /// Override file in effect, if any
    pub fn reference_path(&self) -> Option<&Path> {
        self.reference.as_deref()
    }

    /// Built-in reference tables merged with the override file
    pub fn tables(&self) -> Result<ReferenceTables> {
        Ok(ReferenceTables::load(self.reference_path())?)
    }

    /// Production quantity: explicit flag, then the document, then config
    pub fn quantity(&self, requested: Option<NonZeroU32>, document: Option<NonZeroU32>) -> NonZeroU32 {
        requested
            .or(document)
            .unwrap_or_else(|| self.config.quantity())
    }

    /// Read, schema-check and normalize a design file
    pub fn load_design(&self, path: &Path) -> Result<LoadedDesign> {
        let (content, document) = yaml::load_design(path)?;
        self.schema.validate(&content, &path.display().to_string())?;
        let design = document.parameters.normalize()?;

        let name = document.name.clone().unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "part".to_string())
        });

        Ok(LoadedDesign {
            path: path.to_path_buf(),
            name,
            quantity: document.quantity,
            design,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn global(format: OutputFormat) -> GlobalOpts {
        GlobalOpts {
            format,
            quiet: false,
            verbose: 0,
            reference: None,
        }
    }

    #[test]
    fn test_flag_format_beats_config() {
        let config = Config {
            default_format: Some("json".to_string()),
            ..Default::default()
        };
        let session = Session::new(&global(OutputFormat::Csv), config.clone());
        assert_eq!(session.format, OutputFormat::Csv);

        let session = Session::new(&global(OutputFormat::Auto), config);
        assert_eq!(session.format, OutputFormat::Json);
    }

    #[test]
    fn test_quantity_precedence() {
        let session = Session::new(&global(OutputFormat::Auto), Config::default());
        let flag = NonZeroU32::new(10);
        let doc = NonZeroU32::new(20);
        assert_eq!(session.quantity(flag, doc).get(), 10);
        assert_eq!(session.quantity(None, doc).get(), 20);
        assert_eq!(session.quantity(None, None).get(), 100);
    }

    #[test]
    fn test_load_design_uses_file_stem() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("motor_mount.yaml");
        std::fs::write(&path, "primary_geometry:\n  type: bracket\nquantity: 40\n").unwrap();

        let session = Session::new(&global(OutputFormat::Auto), Config::default());
        let loaded = session.load_design(&path).unwrap();
        assert_eq!(loaded.name, "motor_mount");
        assert_eq!(loaded.quantity.map(|q| q.get()), Some(40));
        assert_eq!(loaded.design.geometry.kind().to_string(), "bracket");
    }

    #[test]
    fn test_load_design_rejects_schema_violation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.yaml");
        std::fs::write(&path, "primary_geometry:\n  length: -5\n").unwrap();

        let session = Session::new(&global(OutputFormat::Auto), Config::default());
        assert!(session.load_design(&path).is_err());
    }
}
