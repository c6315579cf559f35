//! Model API configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw model API configuration from TOML
///
/// The API key itself never lives in the file: `api_key_env` names the
/// environment variable to read it from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    pub model: String,
    /// Base URL of an OpenAI-compatible API
    pub api_base: String,
    pub temperature: f64,
    /// Request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,
    pub api_key_env: String,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            temperature: 0.7,
            timeout_secs: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl FileLlmConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
