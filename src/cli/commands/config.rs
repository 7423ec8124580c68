//! `partwise config` command - inspect configuration
//!
//! Configuration is read-only from the command line; edit the YAML files
//! shown by `partwise config path`.

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::output::print_structured;
use crate::cli::Session;
use crate::core::config::PROJECT_CONFIG_FILE;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("reference_file", "Reference override file (materials, processes, rules)"),
    ("default_quantity", "Production quantity when none is given (default 100)"),
    ("default_format", "Default output format (yaml, json, tsv, csv, md)"),
    ("log_level", "Log filter directive (e.g. debug, partwise::core=trace)"),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, session: &Session) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, session),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, session: &Session) -> Result<()> {
    let config = &session.config;

    if let Some(key) = &args.key {
        if !VALID_KEYS.iter().any(|(k, _)| k == key) {
            return Err(miette::miette!(
                help = "Run `partwise config keys` to list valid keys",
                "Unknown config key '{}'",
                key
            ));
        }
        return match get_config_value(config, key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    if session.format.is_structured() {
        return print_structured(config, session.format);
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        print_config_value(key, get_config_value(config, key).as_deref());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Command-line flags (--reference, --format, -v/-q)");
    println!("  2. Environment variables (PARTWISE_REFERENCE, PARTWISE_QUANTITY, PARTWISE_FORMAT, PARTWISE_LOG)");
    println!("  3. Project config ({} in this or a parent directory)", PROJECT_CONFIG_FILE);
    println!("  4. Global config (~/.config/partwise/config.yaml)");

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "reference_file" => config
            .reference_file
            .as_ref()
            .map(|p| p.display().to_string()),
        "default_quantity" => config.default_quantity.map(|q| q.to_string()),
        "default_format" => config.default_format.clone(),
        "log_level" => config.log_level.clone(),
        _ => None,
    }
}

fn print_config_value(key: &str, value: Option<&str>) {
    match value {
        Some(v) => println!("  {} = {}", style(key).cyan(), style(v).yellow()),
        None => println!("  {} = {}", style(key).cyan(), style("(not set)").dim()),
    }
}

fn run_path() -> Result<()> {
    println!("{}", style("Configuration file paths:").bold());
    println!();

    match Config::global_config_path() {
        Some(global_path) => {
            println!("  {} {}", style("Global:").cyan(), global_path.display());
            if global_path.exists() {
                println!("          {}", style("(exists)").green());
            } else {
                println!("          {}", style("(not created)").dim());
            }
        }
        None => println!("  {} {}", style("Global:").cyan(), style("(no home directory)").dim()),
    }

    let project_path = std::env::current_dir()
        .ok()
        .and_then(|cwd| Config::project_config_path(&cwd));
    match project_path {
        Some(path) => {
            println!("  {} {}", style("Project:").cyan(), path.display());
            println!("          {}", style("(exists)").green());
        }
        None => println!(
            "  {} {}",
            style("Project:").cyan(),
            style(format!("(no {} found)", PROJECT_CONFIG_FILE)).dim()
        ),
    }

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();
    for (key, description) in VALID_KEYS {
        println!("  {:<18} {}", style(key).cyan(), style(description).dim());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;
    use std::path::PathBuf;

    #[test]
    fn test_get_config_value() {
        let config = Config {
            reference_file: Some(PathBuf::from("/etc/partwise/eu.yaml")),
            default_quantity: NonZeroU32::new(250),
            ..Default::default()
        };
        assert_eq!(
            get_config_value(&config, "reference_file").as_deref(),
            Some("/etc/partwise/eu.yaml")
        );
        assert_eq!(get_config_value(&config, "default_quantity").as_deref(), Some("250"));
        assert_eq!(get_config_value(&config, "log_level"), None);
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = Config {
            reference_file: Some(PathBuf::from("r.yaml")),
            default_quantity: NonZeroU32::new(1),
            default_format: Some("json".to_string()),
            log_level: Some("debug".to_string()),
        };
        for (key, _) in VALID_KEYS {
            assert!(get_config_value(&config, key).is_some(), "{key}");
        }
    }
}
