use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// File looked up in the working directory when no --config is given
pub const CONFIG_FILE_NAME: &str = "roster.toml";

/// Error type for reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read and parse a config file. Missing keys take their defaults.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve the configuration for this run.
///
/// An explicit path must exist. Otherwise `roster.toml` in `dir` is used if
/// present, and built-in defaults if not.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let candidate = dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        read_config(&candidate)
    } else {
        Ok(Config::default())
    }
}
