//! Conversation session domain.
//!
//! - [`entities::Message`]: a single turn within a session
//! - [`entities::AgentMessage`]: a message in the agent's working transcript
//! - [`response::LlmResponse`]: structured model output (text and tool use)

pub mod entities;
pub mod response;
