//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use crate::entities::DEFAULT_QUANTITY;

/// Project config file name, searched for from the working directory upward
pub const PROJECT_CONFIG_FILE: &str = ".partwise.yaml";

/// Partwise configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reference override file merged over the built-in tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_file: Option<PathBuf>,

    /// Production quantity when a command does not give one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_quantity: Option<NonZeroU32>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Log filter directive (e.g. `debug` or `partwise::core=trace`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/partwise/config.yaml)
        if let Some(global) = Self::global_config_path().and_then(|p| Self::read_file(&p)) {
            config.merge(global);
        }

        // 3. Project config (.partwise.yaml here or in a parent directory)
        if let Some(project) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::project_config_path(&cwd))
            .and_then(|p| Self::read_file(&p))
        {
            config.merge(project);
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "partwise")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Find the nearest project config file at or above `start`
    pub fn project_config_path(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Read one config file. Unreadable or malformed files are skipped.
    /// A relative `reference_file` is taken relative to the file's directory.
    pub fn read_file(path: &Path) -> Option<Config> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut config: Config = serde_yml::from_str(&contents).ok()?;
        if let (Some(reference), Some(dir)) = (config.reference_file.as_ref(), path.parent()) {
            if reference.is_relative() {
                config.reference_file = Some(dir.join(reference));
            }
        }
        Some(config)
    }

    /// Apply `PARTWISE_*` overrides from an environment lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(reference) = lookup("PARTWISE_REFERENCE").filter(|v| !v.is_empty()) {
            self.reference_file = Some(PathBuf::from(reference));
        }
        if let Some(quantity) = lookup("PARTWISE_QUANTITY").and_then(|v| v.trim().parse().ok()) {
            self.default_quantity = Some(quantity);
        }
        if let Some(format) = lookup("PARTWISE_FORMAT").filter(|v| !v.is_empty()) {
            self.default_format = Some(format);
        }
        if let Some(level) = lookup("PARTWISE_LOG").filter(|v| !v.is_empty()) {
            self.log_level = Some(level);
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.reference_file.is_some() {
            self.reference_file = other.reference_file;
        }
        if other.default_quantity.is_some() {
            self.default_quantity = other.default_quantity;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
    }

    /// Production quantity, falling back to the built-in default
    pub fn quantity(&self) -> NonZeroU32 {
        self.default_quantity.unwrap_or(DEFAULT_QUANTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.quantity().get(), 100);
        assert!(config.reference_file.is_none());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            default_format: Some("yaml".to_string()),
            log_level: Some("info".to_string()),
            ..Default::default()
        };
        base.merge(Config {
            default_format: Some("json".to_string()),
            ..Default::default()
        });
        assert_eq!(base.default_format.as_deref(), Some("json"));
        assert_eq!(base.log_level.as_deref(), Some("info"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PARTWISE_QUANTITY", "250"),
            ("PARTWISE_FORMAT", "json"),
            ("PARTWISE_REFERENCE", "/tmp/eu.yaml"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.quantity().get(), 250);
        assert_eq!(config.default_format.as_deref(), Some("json"));
        assert_eq!(config.reference_file, Some(PathBuf::from("/tmp/eu.yaml")));
    }

    #[test]
    fn test_env_zero_quantity_ignored() {
        let mut config = Config::default();
        config.apply_env(|k| (k == "PARTWISE_QUANTITY").then(|| "0".to_string()));
        assert_eq!(config.quantity().get(), 100);
    }

    #[test]
    fn test_project_config_found_in_parent() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(PROJECT_CONFIG_FILE),
            "default_quantity: 500\nreference_file: pricing/eu.yaml\n",
        )
        .unwrap();
        let nested = tmp.path().join("parts").join("brackets");
        std::fs::create_dir_all(&nested).unwrap();

        let path = Config::project_config_path(&nested).unwrap();
        let config = Config::read_file(&path).unwrap();
        assert_eq!(config.quantity().get(), 500);
        assert_eq!(
            config.reference_file,
            Some(tmp.path().join("pricing/eu.yaml"))
        );
    }

    #[test]
    fn test_malformed_file_skipped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(PROJECT_CONFIG_FILE);
        std::fs::write(&path, "default_quantity: [not, a, number]\n").unwrap();
        assert!(Config::read_file(&path).is_none());
    }
}
