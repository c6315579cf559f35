//! LLM Gateway port
//!
//! Defines the interface for communicating with the hosted language model.

use aida_domain::{AgentMessage, LlmResponse, ToolDefinition};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One completion request: instruction, transcript, and the tools on offer.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system_prompt: &'a str,
    pub messages: &'a [AgentMessage],
    pub tools: &'a [&'a ToolDefinition],
}

/// Gateway for LLM communication
///
/// The model API is stateless: every call carries the full transcript.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Model identifier used for requests
    fn model_name(&self) -> &str;

    /// Ask the model for the next assistant message
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<LlmResponse, GatewayError>;
}
