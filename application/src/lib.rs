//! Application layer for aida
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RelayParams;
pub use ports::{
    catalog::CatalogPort,
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    session_store::{SessionStore, SessionStoreError},
    tool_executor::ToolExecutorPort,
};
pub use use_cases::relay::{
    COULD_NOT_PROCESS_MESSAGE, ConversationRelay, PROCESSING_ERROR_MESSAGE,
};
pub use use_cases::run_agent::{RunAgentError, RunAgentInput, RunAgentOutput, RunAgentUseCase};
