//! Conversation loop configuration from TOML (`[relay]` section)

use aida_application::RelayParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw relay configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRelayConfig {
    /// Trailing turns sent to the model
    pub history_window: usize,
    /// Tool rounds per message before giving up
    pub max_tool_turns: usize,
    /// Cap on stored turns per session (unbounded if unset)
    pub max_stored_turns: Option<usize>,
    /// Evict sessions idle for this long (never if unset)
    pub session_ttl_secs: Option<u64>,
}

impl Default for FileRelayConfig {
    fn default() -> Self {
        let params = RelayParams::default();
        Self {
            history_window: params.history_window,
            max_tool_turns: params.max_tool_turns,
            max_stored_turns: None,
            session_ttl_secs: None,
        }
    }
}

impl FileRelayConfig {
    pub fn to_params(&self) -> RelayParams {
        RelayParams::default()
            .with_history_window(self.history_window)
            .with_max_tool_turns(self.max_tool_turns)
            .with_max_stored_turns(self.max_stored_turns)
            .with_session_ttl(self.session_ttl_secs.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_params() {
        let config = FileRelayConfig {
            history_window: 4,
            max_tool_turns: 2,
            max_stored_turns: Some(20),
            session_ttl_secs: Some(600),
        };
        let params = config.to_params();
        assert_eq!(params.history_window, 4);
        assert_eq!(params.max_tool_turns, 2);
        assert_eq!(params.max_stored_turns, Some(20));
        assert_eq!(params.session_ttl, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_default_matches_relay_defaults() {
        assert_eq!(FileRelayConfig::default().to_params(), RelayParams::default());
    }
}
