//! LLM response types for native tool use.
//!
//! Chat-completion APIs return an assistant message that mixes text and
//! tool use requests. [`LlmResponse`] models that structure, and
//! [`LlmResponse::step`] collapses it into the two outcomes the agent loop
//! cares about:
//!
//! ```text
//! LlmResponse ──step()──▶ AgentStep::Reply(text)          → done
//!                      └▶ AgentStep::ToolRequest(calls)    → run tools, ask again
//! ```

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single block of content within an LLM response.
///
/// # Examples
///
/// ```
/// use aida_domain::session::response::ContentBlock;
///
/// let text = ContentBlock::Text("Let me check the inventory.".to_string());
/// assert!(text.as_text().is_some());
///
/// let tool = ContentBlock::ToolUse {
///     id: "call_abc123".to_string(),
///     name: "getProductList".to_string(),
///     input: Default::default(),
/// };
/// assert!(tool.as_tool_use().is_some());
/// ```
#[derive(Debug, Clone)]
pub enum ContentBlock {
    /// A text content block from the model.
    Text(String),

    /// A tool use request from the model.
    ToolUse {
        /// API-assigned ID for correlating with tool results (e.g. "call_abc123").
        id: String,
        /// Tool name as requested by the model.
        name: String,
        /// Structured arguments.
        input: HashMap<String, serde_json::Value>,
    },
}

impl ContentBlock {
    /// Returns the text content if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `(id, name, input)` if this is a `ToolUse` block.
    pub fn as_tool_use(&self) -> Option<(&str, &str, &HashMap<String, serde_json::Value>)> {
        match self {
            ContentBlock::ToolUse { id, name, input } => Some((id, name, input)),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// The model wants to call tools.
    ToolUse,
    /// Hit the token limit; the response may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

/// A structured response from an LLM, supporting both text and tool use.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Content blocks in the response (text and/or tool use).
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating.
    pub stop_reason: Option<StopReason>,
    /// Model identifier (if returned by the API).
    pub model: Option<String>,
}

/// Outcome of one assistant step.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentStep {
    /// Plain reply; the agent run is finished.
    Reply(String),
    /// The model asked for tools; `text` is any accompanying commentary.
    ToolRequest { text: String, calls: Vec<ToolCall> },
}

impl LlmResponse {
    /// Create a text-only response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract all `ToolUse` content blocks as `Vec<ToolCall>`.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(ToolCall::from_native(id, name, input.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if the response contains any tool use requests.
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }

    /// Classify this response as a reply or a tool request.
    ///
    /// Any tool use block makes it a tool request, regardless of the
    /// reported stop reason.
    pub fn step(&self) -> AgentStep {
        if self.has_tool_calls() {
            AgentStep::ToolRequest {
                text: self.text_content(),
                calls: self.tool_calls(),
            }
        } else {
            AgentStep::Reply(self.text_content())
        }
    }
}
