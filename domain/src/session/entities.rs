//! Session domain entities

use crate::tool::entities::ToolCall;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human user
    User,
    /// The assistant (model) reply
    Assistant,
}

/// A turn in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Return the last `n` turns of a history (the whole history if shorter).
pub fn trailing_window(history: &[Message], n: usize) -> &[Message] {
    let start = history.len().saturating_sub(n);
    &history[start..]
}

/// A message in the agent's working transcript.
///
/// Stored conversation turns map onto `User`/`Assistant`; the assistant's
/// tool requests and the tool outputs only exist for the duration of one
/// agent run and are never stored in the session.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentMessage {
    User(String),
    Assistant {
        text: String,
        tool_calls: Vec<ToolCall>,
    },
    ToolResult {
        tool_use_id: String,
        tool_name: String,
        output: String,
        is_error: bool,
    },
}

impl AgentMessage {
    pub fn assistant_text(text: impl Into<String>) -> Self {
        AgentMessage::Assistant {
            text: text.into(),
            tool_calls: Vec::new(),
        }
    }
}

impl From<&Message> for AgentMessage {
    fn from(message: &Message) -> Self {
        match message.role {
            Role::User => AgentMessage::User(message.content.clone()),
            Role::Assistant => AgentMessage::assistant_text(message.content.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n: usize) -> Vec<Message> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("q{}", i))
                } else {
                    Message::assistant(format!("a{}", i))
                }
            })
            .collect()
    }

    #[test]
    fn test_window_shorter_history() {
        let h = history(3);
        assert_eq!(trailing_window(&h, 5).len(), 3);
    }

    #[test]
    fn test_window_takes_most_recent() {
        let h = history(12);
        let window = trailing_window(&h, 5);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].content, "a7");
        assert_eq!(window[4].content, "a11");
    }

    #[test]
    fn test_window_zero() {
        let h = history(4);
        assert!(trailing_window(&h, 0).is_empty());
    }

    #[test]
    fn test_message_to_agent_message() {
        assert_eq!(
            AgentMessage::from(&Message::user("hi")),
            AgentMessage::User("hi".to_string())
        );
        assert_eq!(
            AgentMessage::from(&Message::assistant("hello")),
            AgentMessage::assistant_text("hello")
        );
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }
}
