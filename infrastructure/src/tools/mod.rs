//! Tools the assistant may call
//!
//! Each tool is a [`ToolHandler`]; the [`ToolRegistry`] is the dispatch table
//! the agent loop executes against.

mod product_list;
mod registry;
mod schema;

pub use product_list::{PRODUCT_LIST_ALIAS, PRODUCT_LIST_TOOL, ProductListTool};
pub use registry::{ToolHandler, ToolRegistry};
pub use schema::{tool_to_function_schema, tools_to_function_schemas};

use aida_application::ports::catalog::CatalogPort;
use std::sync::Arc;

/// Registry with every inventory tool, backed by the given catalog.
pub fn inventory_tools(catalog: Arc<dyn CatalogPort>) -> ToolRegistry {
    ToolRegistry::new()
        .register(ProductListTool::new(catalog))
        .with_alias(PRODUCT_LIST_ALIAS, PRODUCT_LIST_TOOL)
}
