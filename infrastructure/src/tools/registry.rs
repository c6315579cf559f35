//! Tool Registry
//!
//! The [`ToolRegistry`] maps tool names to handlers and implements
//! [`ToolExecutorPort`]. Every call is resolved (aliases included), then
//! dispatched; unknown names come back as `NOT_FOUND` results.
//!
//! ```ignore
//! let registry = ToolRegistry::new()
//!     .register(ProductListTool::new(catalog))
//!     .with_alias("get_product_list", "getProductList");
//!
//! let result = registry.execute(&ToolCall::new("get_product_list")).await;
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use aida_application::ports::tool_executor::ToolExecutorPort;
use aida_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::{ToolError, ToolResult},
};
use async_trait::async_trait;
use tracing::{debug, warn};

/// A single callable tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Definition advertised to the model
    fn definition(&self) -> ToolDefinition;

    /// Run the tool
    async fn call(&self, call: &ToolCall) -> Result<String, ToolError>;
}

/// Dispatch table from tool name to handler
pub struct ToolRegistry {
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
    tool_spec: ToolSpec,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            tool_spec: ToolSpec::new(),
        }
    }

    /// Register a tool handler under its definition's name
    pub fn register<H: ToolHandler + 'static>(self, handler: H) -> Self {
        self.register_arc(Arc::new(handler))
    }

    /// Register a tool handler (Arc version)
    pub fn register_arc(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        let definition = handler.definition();
        self.handlers.insert(definition.name.clone(), handler);
        self.tool_spec = std::mem::take(&mut self.tool_spec).register(definition);
        self
    }

    /// Accept `alias` as another name for `canonical`
    pub fn with_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.tool_spec = std::mem::take(&mut self.tool_spec).register_alias(alias, canonical);
        self
    }

    async fn dispatch(&self, call: &ToolCall) -> Result<String, ToolError> {
        let canonical = self
            .tool_spec
            .resolve(&call.tool_name)
            .ok_or_else(|| ToolError::unknown_tool(&call.tool_name))?;
        let handler = self
            .handlers
            .get(canonical)
            .ok_or_else(|| ToolError::unknown_tool(&call.tool_name))?;

        handler.call(call).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let started = Instant::now();
        let result = match self.dispatch(call).await {
            Ok(output) => {
                let bytes = output.len();
                let mut result = ToolResult::success(&call.tool_name, output);
                result.metadata.bytes = Some(bytes);
                result
            }
            Err(error) => {
                warn!(tool = %call.tool_name, %error, "Tool call rejected or failed");
                ToolResult::failure(&call.tool_name, error)
            }
        };
        let elapsed = started.elapsed().as_millis() as u64;
        debug!(tool = %call.tool_name, elapsed_ms = elapsed, "Tool executed");
        result.with_duration(elapsed)
    }
}
