//! Domain layer for aida
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Catalog
//!
//! Products fetched from the inventory backend and the text rendering the
//! assistant receives when it asks for the product list.
//!
//! ## Conversation
//!
//! A session is an ordered list of turns (human or assistant). Only the
//! trailing window of a session is ever sent to the model.
//!
//! ## Tools
//!
//! Named functions the model may request mid-conversation. The model's answer
//! is either a plain reply or a tool request ([`AgentStep`]).

pub mod catalog;
pub mod core;
pub mod prompt;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use catalog::{
    entities::Product,
    format::{
        FORMAT_ERROR_MESSAGE, NO_PRODUCTS_MESSAGE, format_catalog, format_price, format_product,
        try_format_catalog,
    },
};
pub use core::error::DomainError;
pub use util::preview;
pub use prompt::AgentPromptTemplate;
pub use session::{
    entities::{AgentMessage, Message, Role, trailing_window},
    response::{AgentStep, ContentBlock, LlmResponse, StopReason},
};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
