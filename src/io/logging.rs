use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::model::config::LogConfig;

/// Where log output should go for this run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Subcommands: stderr, plus the configured file if any
    Stderr,
    /// TUI: the terminal is taken, so only the configured file (if any)
    FileOnly,
}

/// Error type for logging setup
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("could not open log file {path}: {source}")]
    OpenError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not install log subscriber: {0}")]
    InitError(String),
}

/// The sinks a run writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sinks {
    pub stderr: bool,
    pub file: Option<PathBuf>,
}

impl Sinks {
    pub fn resolve(config: &LogConfig, target: LogTarget) -> Self {
        Sinks {
            stderr: target == LogTarget::Stderr,
            file: config.file.as_ref().map(PathBuf::from),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.stderr && self.file.is_none()
    }
}

/// RUST_LOG if set and valid, otherwise the configured directive.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Install the global `tracing` subscriber.
pub fn init_logging(config: &LogConfig, target: LogTarget) -> Result<(), LogError> {
    let sinks = Sinks::resolve(config, target);
    if sinks.is_empty() {
        return Ok(());
    }

    let file_layer = match sinks.file {
        Some(path) => {
            let handle = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| LogError::OpenError { path, source: e })?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(handle)),
            )
        }
        None => None,
    };
    let stderr_layer = sinks
        .stderr
        .then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LogError::InitError(e.to_string()))
}
