//! Relay wiring with in-process fakes for transport tests.

use aida_application::{
    CompletionRequest, ConversationRelay, GatewayError, LlmGateway, RelayParams, RunAgentUseCase,
    SessionStore, SessionStoreError, ToolExecutorPort,
};
use aida_domain::{AgentMessage, LlmResponse, Message, ToolCall, ToolResult, ToolSpec};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct MemoryStore {
    sessions: Mutex<HashMap<String, Vec<Message>>>,
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, session_id: &str) -> Result<Option<Vec<Message>>, SessionStoreError> {
        Ok(self.sessions.lock().unwrap().get(session_id).cloned())
    }

    async fn append(&self, session_id: &str, message: Message) -> Result<(), SessionStoreError> {
        self.sessions
            .lock()
            .unwrap()
            .entry(session_id.to_string())
            .or_default()
            .push(message);
        Ok(())
    }

    async fn trim(&self, _session_id: &str, _keep_last: usize) -> Result<usize, SessionStoreError> {
        Ok(0)
    }

    async fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    async fn evict_idle(&self, _max_idle: Duration, _busy: &HashSet<String>) -> usize {
        0
    }
}

/// Replies `"echo: <last user message>"`; panics on the message `"panic"`.
pub struct EchoGateway;

#[async_trait]
impl LlmGateway for EchoGateway {
    fn model_name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<LlmResponse, GatewayError> {
        let last = request
            .messages
            .iter()
            .rev()
            .find_map(|m| match m {
                AgentMessage::User(text) => Some(text.clone()),
                _ => None,
            })
            .unwrap_or_default();
        if last == "panic" {
            panic!("gateway blew up");
        }
        Ok(LlmResponse::from_text(format!("echo: {}", last)))
    }
}

struct NoTools(ToolSpec);

#[async_trait]
impl ToolExecutorPort for NoTools {
    fn tool_spec(&self) -> &ToolSpec {
        &self.0
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        ToolResult::success(&call.tool_name, "")
    }
}

pub fn echo_relay() -> Arc<ConversationRelay> {
    let agent = RunAgentUseCase::new(Arc::new(EchoGateway), Arc::new(NoTools(ToolSpec::new())));
    Arc::new(ConversationRelay::new(
        Arc::new(MemoryStore::default()),
        agent,
        "You are AIda",
        RelayParams::default(),
    ))
}
