//! Chat Completions wire types and their mapping to domain types.
//!
//! ```text
//! [AgentMessage] ──to_chat_messages──▶ [ChatMessage]  (request)
//! ChatCompletionResponse ──into_llm_response──▶ LlmResponse
//! ```

use aida_application::GatewayError;
use aida_domain::{AgentMessage, ContentBlock, LlmResponse, StopReason, ToolCall};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub kind: String,
    pub function: WireFunction,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunction {
    pub name: String,
    /// JSON-encoded argument object
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// System prompt first, then the transcript in order.
pub fn to_chat_messages(system_prompt: &str, transcript: &[AgentMessage]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    messages.push(ChatMessage::text("system", system_prompt));

    for message in transcript {
        messages.push(match message {
            AgentMessage::User(text) => ChatMessage::text("user", text.clone()),
            AgentMessage::Assistant { text, tool_calls } if tool_calls.is_empty() => {
                ChatMessage::text("assistant", text.clone())
            }
            AgentMessage::Assistant { text, tool_calls } => ChatMessage {
                role: "assistant".to_string(),
                content: (!text.is_empty()).then(|| text.clone()),
                tool_calls: Some(tool_calls.iter().map(to_wire_call).collect()),
                tool_call_id: None,
            },
            AgentMessage::ToolResult {
                tool_use_id,
                output,
                ..
            } => ChatMessage {
                role: "tool".to_string(),
                content: Some(output.clone()),
                tool_calls: None,
                tool_call_id: Some(tool_use_id.clone()),
            },
        });
    }

    messages
}

fn to_wire_call(call: &ToolCall) -> WireToolCall {
    WireToolCall {
        id: call.native_id.clone().unwrap_or_default(),
        kind: function_type(),
        function: WireFunction {
            name: call.tool_name.clone(),
            arguments: serde_json::to_string(&call.arguments).unwrap_or_else(|_| "{}".to_string()),
        },
    }
}

impl ChatCompletionResponse {
    pub fn into_llm_response(self) -> Result<LlmResponse, GatewayError> {
        let model = self.model;
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))?;

        let mut content = Vec::new();
        if let Some(text) = choice.message.content.filter(|t| !t.is_empty()) {
            content.push(ContentBlock::Text(text));
        }
        for call in choice.message.tool_calls.unwrap_or_default() {
            content.push(ContentBlock::ToolUse {
                input: parse_arguments(&call.function.name, &call.function.arguments),
                id: call.id,
                name: call.function.name,
            });
        }

        Ok(LlmResponse {
            content,
            stop_reason: choice.finish_reason.map(|r| stop_reason(&r)),
            model,
        })
    }
}

/// Malformed argument JSON becomes an empty object.
fn parse_arguments(tool: &str, raw: &str) -> HashMap<String, serde_json::Value> {
    if raw.trim().is_empty() {
        return HashMap::new();
    }
    match serde_json::from_str(raw) {
        Ok(args) => args,
        Err(e) => {
            warn!(tool, error = %e, "Unparseable tool arguments from model");
            HashMap::new()
        }
    }
}

fn stop_reason(raw: &str) -> StopReason {
    match raw {
        "stop" => StopReason::EndTurn,
        "tool_calls" | "function_call" => StopReason::ToolUse,
        "length" => StopReason::MaxTokens,
        other => StopReason::Other(other.to_string()),
    }
}
