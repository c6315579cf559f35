//! Catalog backend configuration from TOML (`[catalog]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw catalog configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    /// Base URL of the inventory REST API (without trailing `/products`)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileCatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081/api".to_string(),
            timeout_secs: 10,
        }
    }
}

impl FileCatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
