//! Prompt templates for the inventory assistant

use crate::tool::entities::ToolSpec;

/// Name the assistant introduces itself with
pub const ASSISTANT_NAME: &str = "AIda";

/// Templates for generating assistant prompts
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    /// System instruction: persona, formatting rules, response language.
    ///
    /// Tool names are listed so the instruction stays in sync with what is
    /// actually registered.
    pub fn assistant_system(tool_spec: &ToolSpec) -> String {
        let tools = tool_spec
            .sorted()
            .iter()
            .map(|t| format!("- {}: {}", t.name, t.description))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are {name}, a friendly AI assistant managing our computer inventory system.

When starting a conversation:
1. Introduce yourself as {name}
2. Keep your tone professional but friendly
3. Always use English for your responses

Available tools:
{tools}

For product information:
- Use the product list tool to get the latest inventory
- Format prices as $X,XXX.XX
- Use bullet points for lists
- Include line breaks for readability

Handle these types of queries:
1. For counting: State the total number of computers
2. For specific products: Provide details about that product
3. For comparisons: Focus on key differences between products
4. For prices: State exact prices with proper formatting

Remember:
- Keep responses concise and clear
- Use proper formatting with line breaks
- Maintain a helpful, professional tone
"#,
            name = ASSISTANT_NAME,
            tools = tools,
        )
    }
}
