//! JSON Schema tool conversion for OpenAI-style `function` tools.
//!
//! Every tool takes no arguments, so the parameter object is always empty.

use aida_domain::ToolDefinition;
use serde_json::{Value, json};

/// One tool as a `{"type": "function", "function": {...}}` entry.
pub fn tool_to_function_schema(tool: &ToolDefinition) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": {},
                "required": [],
            }
        }
    })
}

/// Schemas for a list of tools, in the given order.
pub fn tools_to_function_schemas(tools: &[&ToolDefinition]) -> Vec<Value> {
    tools.iter().map(|t| tool_to_function_schema(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_without_parameters() {
        let tool = ToolDefinition::new("getProductList", "List products");
        let schema = tool_to_function_schema(&tool);

        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "getProductList");
        assert_eq!(schema["function"]["description"], "List products");
        assert_eq!(schema["function"]["parameters"]["type"], "object");
        assert!(
            schema["function"]["parameters"]["properties"]
                .as_object()
                .unwrap()
                .is_empty()
        );
        assert!(
            schema["function"]["parameters"]["required"]
                .as_array()
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_schemas_keep_order() {
        let list = ToolDefinition::new("getProductList", "List products");
        let other = ToolDefinition::new("alpha", "First");
        let schemas = tools_to_function_schemas(&[&list, &other]);

        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0]["function"]["name"], "getProductList");
        assert_eq!(schemas[1]["function"]["name"], "alpha");
    }
}
