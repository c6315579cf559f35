//! OpenAI Chat Completions adapter

mod error;
mod gateway;
mod protocol;

pub use gateway::OpenAiGateway;
