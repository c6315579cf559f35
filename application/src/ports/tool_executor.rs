//! Tool Executor port
//!
//! Defines the interface for dispatching model-requested tool calls.

use aida_domain::tool::{
    entities::{ToolCall, ToolSpec},
    value_objects::ToolResult,
};
use async_trait::async_trait;

/// Port for tool execution
///
/// Execution never fails at the type level: unknown tools, invalid
/// arguments and runtime errors are reported inside the [`ToolResult`].
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool (or alias) is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().resolve(name).is_some()
    }

    /// Execute a tool call
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
