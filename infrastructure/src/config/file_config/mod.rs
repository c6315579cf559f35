//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is `#[serde(default)]`, so a partial file (or none at all)
//! still yields a complete configuration.

mod catalog;
mod llm;
mod logging;
mod relay;
mod server;

pub use catalog::FileCatalogConfig;
pub use llm::FileLlmConfig;
pub use logging::FileLoggingConfig;
pub use relay::FileRelayConfig;
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A configuration value that cannot be used as-is
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("server.port cannot be 0")]
    ZeroPort,

    #[error("catalog.base_url cannot be empty")]
    EmptyCatalogUrl,

    #[error("catalog.timeout_secs cannot be 0")]
    ZeroCatalogTimeout,

    #[error("llm.model cannot be empty")]
    EmptyModelName,

    #[error("llm.temperature must be within 0.0..=2.0 (got {0})")]
    TemperatureOutOfRange(f64),

    #[error("relay.history_window cannot be 0")]
    ZeroHistoryWindow,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP/WebSocket listener
    pub server: FileServerConfig,
    /// Product inventory backend
    pub catalog: FileCatalogConfig,
    /// Hosted model API
    pub llm: FileLlmConfig,
    /// Conversation loop
    pub relay: FileRelayConfig,
    /// Log output
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.server.port == 0 {
            issues.push(ConfigValidationError::ZeroPort);
        }
        if self.catalog.base_url.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyCatalogUrl);
        }
        if self.catalog.timeout_secs == 0 {
            issues.push(ConfigValidationError::ZeroCatalogTimeout);
        }
        if self.llm.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            issues.push(ConfigValidationError::TemperatureOutOfRange(
                self.llm.temperature,
            ));
        }
        if self.relay.history_window == 0 {
            issues.push(ConfigValidationError::ZeroHistoryWindow);
        }

        issues
    }

    /// Render the merged configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
