//! `getProductList`: the current inventory, rendered for the model.

use super::registry::ToolHandler;
use aida_application::ports::catalog::CatalogPort;
use aida_domain::{ToolCall, ToolDefinition, ToolError, format_catalog};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub const PRODUCT_LIST_TOOL: &str = "getProductList";

/// Snake-case spelling some models produce for the same tool.
pub const PRODUCT_LIST_ALIAS: &str = "get_product_list";

pub struct ProductListTool {
    catalog: Arc<dyn CatalogPort>,
}

impl ProductListTool {
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ToolHandler for ProductListTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            PRODUCT_LIST_TOOL,
            "Get the list of all available products in the inventory, with prices, \
             stock and specifications",
        )
    }

    async fn call(&self, _call: &ToolCall) -> Result<String, ToolError> {
        let products = self.catalog.fetch_products().await;
        debug!(count = products.len(), "Formatting product list");
        Ok(format_catalog(&products))
    }
}
