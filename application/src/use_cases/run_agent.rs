//! Run Agent use case.
//!
//! Drives the assistant ⇄ tools cycle for one user message:
//!
//! ```text
//!            ┌──────────── tool results ────────────┐
//!            ▼                                      │
//! START ─▶ assistant ── ToolRequest(calls) ──▶ tools ┘
//!            │
//!            └── Reply(text) ──▶ END
//! ```
//!
//! assistant → tools happens only when the model requests a tool;
//! tools → assistant is unconditional. The number of tool rounds is bounded by
//! `max_tool_turns`; past that bound the run fails closed.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use aida_domain::util::preview;
use aida_domain::{AgentMessage, AgentStep, Message, ToolDefinition};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during an agent run.
#[derive(Error, Debug)]
pub enum RunAgentError {
    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("No response from model")]
    EmptyResponse,

    #[error("Tool loop exceeded {0} turns")]
    IterationLimit(usize),
}

impl RunAgentError {
    /// The model answered, but nothing usable came out of it.
    pub fn is_unusable_reply(&self) -> bool {
        matches!(
            self,
            RunAgentError::EmptyResponse | RunAgentError::IterationLimit(_)
        )
    }
}

/// Input for the [`RunAgentUseCase`].
#[derive(Debug, Clone)]
pub struct RunAgentInput {
    /// Fixed system instruction.
    pub system_prompt: String,
    /// Windowed conversation turns, oldest first.
    pub history: Vec<Message>,
    /// Maximum tool rounds before failing closed.
    pub max_tool_turns: usize,
}

/// Result of a successful agent run.
#[derive(Debug, Clone)]
pub struct RunAgentOutput {
    /// The final assistant reply.
    pub reply: String,
    /// Number of tool rounds executed.
    pub tool_turns: usize,
}

/// Use case for running one assistant turn, including any tool calls.
#[derive(Clone)]
pub struct RunAgentUseCase {
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
}

impl RunAgentUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, tool_executor: Arc<dyn ToolExecutorPort>) -> Self {
        Self {
            gateway,
            tool_executor,
        }
    }

    pub async fn execute(&self, input: RunAgentInput) -> Result<RunAgentOutput, RunAgentError> {
        let mut transcript: Vec<AgentMessage> =
            input.history.iter().map(AgentMessage::from).collect();
        let tools: Vec<&ToolDefinition> = self.tool_executor.tool_spec().sorted();

        debug!(
            model = self.gateway.model_name(),
            turns = transcript.len(),
            tools = tools.len(),
            "Starting agent run"
        );

        let mut tool_turns = 0;

        loop {
            let response = self
                .gateway
                .complete(CompletionRequest {
                    system_prompt: &input.system_prompt,
                    messages: &transcript,
                    tools: &tools,
                })
                .await?;

            match response.step() {
                AgentStep::Reply(text) => {
                    if text.trim().is_empty() {
                        return Err(RunAgentError::EmptyResponse);
                    }
                    info!(
                        tool_turns,
                        reply = %preview(&text, 80),
                        "Agent run completed"
                    );
                    return Ok(RunAgentOutput {
                        reply: text,
                        tool_turns,
                    });
                }
                AgentStep::ToolRequest { text, calls } => {
                    tool_turns += 1;
                    if tool_turns > input.max_tool_turns {
                        warn!(
                            "Agent tool loop exceeded max_tool_turns ({})",
                            input.max_tool_turns
                        );
                        return Err(RunAgentError::IterationLimit(input.max_tool_turns));
                    }

                    // Calls without an API id still need a stable correlation id.
                    let calls: Vec<_> = calls
                        .into_iter()
                        .enumerate()
                        .map(|(i, mut call)| {
                            if call.native_id.is_none() {
                                call.native_id = Some(format!("call_{}_{}", tool_turns, i));
                            }
                            call
                        })
                        .collect();

                    transcript.push(AgentMessage::Assistant {
                        text,
                        tool_calls: calls.clone(),
                    });

                    let started = Instant::now();
                    let results = futures::future::join_all(
                        calls.iter().map(|call| self.tool_executor.execute(call)),
                    )
                    .await;

                    debug!(
                        "Tool turn {}/{}: {} call(s) in {}ms",
                        tool_turns,
                        input.max_tool_turns,
                        calls.len(),
                        started.elapsed().as_millis()
                    );

                    for (call, result) in calls.iter().zip(results) {
                        if !result.is_success() {
                            warn!(
                                tool = %call.tool_name,
                                error = %result.content_for_model(),
                                "Tool call failed"
                            );
                        }
                        transcript.push(AgentMessage::ToolResult {
                            tool_use_id: call.native_id.clone().unwrap_or_default(),
                            tool_name: call.tool_name.clone(),
                            output: result.content_for_model(),
                            is_error: !result.is_success(),
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aida_domain::{
        ContentBlock, LlmResponse, StopReason, ToolCall, ToolError, ToolResult, ToolSpec,
    };
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct ScriptedGateway {
        responses: Mutex<VecDeque<LlmResponse>>,
        seen: Mutex<Vec<Vec<AgentMessage>>>,
    }

    impl ScriptedGateway {
        fn new(responses: Vec<LlmResponse>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        fn model_name(&self) -> &str {
            "test-model"
        }

        async fn complete(
            &self,
            request: CompletionRequest<'_>,
        ) -> Result<LlmResponse, GatewayError> {
            self.seen.lock().unwrap().push(request.messages.to_vec());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| GatewayError::Other("No more responses".to_string()))
        }
    }

    struct CatalogTool {
        spec: ToolSpec,
    }

    impl CatalogTool {
        fn new() -> Self {
            Self {
                spec: ToolSpec::new().register(ToolDefinition::new(
                    "getProductList",
                    "List products",
                )),
            }
        }
    }

    #[async_trait]
    impl ToolExecutorPort for CatalogTool {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall) -> ToolResult {
            if call.tool_name == "getProductList" {
                ToolResult::success(&call.tool_name, "Available Products:\n\n• Dell XPS 13\n")
            } else {
                ToolResult::failure(&call.tool_name, ToolError::unknown_tool(&call.tool_name))
            }
        }
    }

    fn tool_use(name: &str, id: &str) -> LlmResponse {
        LlmResponse {
            content: vec![ContentBlock::ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input: HashMap::new(),
            }],
            stop_reason: Some(StopReason::ToolUse),
            model: Some("test-model".to_string()),
        }
    }

    fn input(max_tool_turns: usize) -> RunAgentInput {
        RunAgentInput {
            system_prompt: "You are AIda".to_string(),
            history: vec![Message::user("How many laptops do you have?")],
            max_tool_turns,
        }
    }

    fn use_case(gateway: Arc<ScriptedGateway>) -> RunAgentUseCase {
        RunAgentUseCase::new(gateway, Arc::new(CatalogTool::new()))
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_direct_reply() {
        let gateway = Arc::new(ScriptedGateway::new(vec![LlmResponse::from_text(
            "Hi, I'm AIda!",
        )]));
        let output = use_case(gateway.clone()).execute(input(5)).await.unwrap();

        assert_eq!(output.reply, "Hi, I'm AIda!");
        assert_eq!(output.tool_turns, 0);
        assert_eq!(gateway.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tool_round_trip_feeds_result_back() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            tool_use("getProductList", "call_1"),
            LlmResponse::from_text("We have 1 laptop: the Dell XPS 13."),
        ]));
        let output = use_case(gateway.clone()).execute(input(5)).await.unwrap();

        assert_eq!(output.reply, "We have 1 laptop: the Dell XPS 13.");
        assert_eq!(output.tool_turns, 1);

        let seen = gateway.seen.lock().unwrap();
        let second = &seen[1];
        assert_eq!(second.len(), 3);
        match &second[2] {
            AgentMessage::ToolResult {
                tool_use_id,
                output,
                is_error,
                ..
            } => {
                assert_eq!(tool_use_id, "call_1");
                assert!(output.contains("Dell XPS 13"));
                assert!(!is_error);
            }
            other => panic!("expected tool result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_is_reported_not_fatal() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            tool_use("dropDatabase", "call_x"),
            LlmResponse::from_text("I can't do that."),
        ]));
        let output = use_case(gateway.clone()).execute(input(5)).await.unwrap();
        assert_eq!(output.reply, "I can't do that.");

        let seen = gateway.seen.lock().unwrap();
        assert!(matches!(
            &seen[1][2],
            AgentMessage::ToolResult { is_error: true, .. }
        ));
    }

    #[tokio::test]
    async fn test_iteration_limit_fails_closed() {
        let responses = (0..10)
            .map(|i| tool_use("getProductList", &format!("call_{}", i)))
            .collect();
        let gateway = Arc::new(ScriptedGateway::new(responses));

        let err = use_case(gateway.clone()).execute(input(3)).await.unwrap_err();
        assert!(matches!(err, RunAgentError::IterationLimit(3)));
        assert!(err.is_unusable_reply());
        // 3 tool rounds executed, the 4th request is refused
        assert_eq!(gateway.seen.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_reply_is_error() {
        let gateway = Arc::new(ScriptedGateway::new(vec![LlmResponse {
            content: vec![],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }]));
        let err = use_case(gateway).execute(input(5)).await.unwrap_err();
        assert!(matches!(err, RunAgentError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_gateway_error_propagates() {
        let gateway = Arc::new(ScriptedGateway::new(vec![]));
        let err = use_case(gateway).execute(input(5)).await.unwrap_err();
        assert!(matches!(err, RunAgentError::GatewayError(_)));
        assert!(!err.is_unusable_reply());
    }
}
