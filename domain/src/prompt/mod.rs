//! Prompt domain
//!
//! The fixed system instruction that defines the assistant persona.

pub mod agent;

pub use agent::AgentPromptTemplate;
