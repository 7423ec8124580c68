//! Diagnostic logging to stderr
//!
//! The library only emits `tracing` events; the binary installs the
//! subscriber once at startup.

use miette::Diagnostic;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error, Diagnostic)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {message}")]
    #[diagnostic(
        code(partwise::logging::filter),
        help("Use a level such as `debug` or directives such as `partwise::core=trace`")
    )]
    InvalidFilter { filter: String, message: String },

    #[error("Logging is already initialized: {0}")]
    #[diagnostic(code(partwise::logging::init))]
    AlreadyInitialized(String),
}

/// Logging settings resolved from flags and configuration
#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    /// `-v` count
    pub verbose: u8,
    /// Errors only
    pub quiet: bool,
    /// Explicit filter directive from config or `PARTWISE_LOG`
    pub directive: Option<String>,
}

impl LogSettings {
    /// Base level implied by the command-line flags
    pub fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Build the event filter. `-v` beats a configured directive, which beats `RUST_LOG`.
    pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
        let builder = EnvFilter::builder().with_default_directive(self.level().into());
        match self.directive.as_deref() {
            Some(directive) if self.verbose == 0 && !self.quiet => {
                builder
                    .parse(directive)
                    .map_err(|e| LoggingError::InvalidFilter {
                        filter: directive.to_string(),
                        message: e.to_string(),
                    })
            }
            _ if self.verbose > 0 || self.quiet => Ok(builder.parse_lossy("")),
            _ => Ok(builder.from_env_lossy()),
        }
    }
}

/// Install the global subscriber, writing compact lines to stderr
pub fn init(settings: &LogSettings) -> Result<(), LoggingError> {
    let filter = settings.filter()?;
    let ansi = console::Term::stderr().features().colors_supported();

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(settings.verbose > 1)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}
