use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default remote endpoint serving the user list
pub const DEFAULT_SOURCE_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Configuration from roster.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Endpoint returning a JSON array of user objects
    #[serde(default = "default_url")]
    pub url: String,
    /// Upper bound on the initial fetch, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Log file. The TUI only logs when this is set.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: default_log_filter(),
            file: None,
        }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color overrides keyed by theme slot, values like "#FB4196"
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
