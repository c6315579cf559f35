//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Also write a daily-rolling log file into this directory
    pub directory: Option<String>,
}
