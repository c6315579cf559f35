//! Relay parameters for the conversation loop.
//!
//! [`RelayParams`] groups the static parameters that control
//! [`ConversationRelay`](crate::use_cases::relay::ConversationRelay) and the
//! agent loop it drives.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Conversation loop control parameters.
///
/// | Field | Default | Effect |
/// |-------|---------|--------|
/// | `history_window` | 5 | Trailing turns sent to the model |
/// | `max_tool_turns` | 5 | Tool rounds before the agent fails closed |
/// | `max_stored_turns` | none | Cap on turns retained per session |
/// | `session_ttl` | none | Idle time after which a session is evicted |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayParams {
    pub history_window: usize,
    pub max_tool_turns: usize,
    pub max_stored_turns: Option<usize>,
    pub session_ttl: Option<Duration>,
}

impl Default for RelayParams {
    fn default() -> Self {
        Self {
            history_window: 5,
            max_tool_turns: 5,
            max_stored_turns: None,
            session_ttl: None,
        }
    }
}

impl RelayParams {
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }

    /// Never keep fewer stored turns than the window needs.
    pub fn with_max_stored_turns(mut self, max: Option<usize>) -> Self {
        self.max_stored_turns = max.map(|m| m.max(self.history_window));
        self
    }

    pub fn with_session_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.session_ttl = ttl;
        self
    }
}
