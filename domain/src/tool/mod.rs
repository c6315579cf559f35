//! Tool domain module
//!
//! Tools give the assistant capabilities beyond text generation. Each tool is
//! described by a [`ToolDefinition`], requested by the model as a
//! [`ToolCall`], and answered with a [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (output)     │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! Models sometimes emit a snake_case variant of a tool name;
//! [`ToolSpec::resolve`] maps registered aliases back to the canonical name.

pub mod entities;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolSpec};
pub use value_objects::{ToolError, ToolResult};
