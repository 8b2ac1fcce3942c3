//! Tool definitions and the registry.
//!
//! Tools are registered explicitly at startup: `ToolRegistry::builtin()`
//! enumerates the compiled-in set, validates name uniqueness, and the
//! registry is immutable (and safe to share) from then on. There is no
//! runtime discovery or directory scanning.

mod expression;
mod factorial;
mod fibonacci;

pub use expression::ComputeExpression;
pub use factorial::FactorialCalculator;
pub use fibonacci::FibonacciCalculator;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

/// The literal substring a tool embeds in its output to signal completion.
pub const TERMINAL_MARKER: &str = "Final Answer:";

/// Fatal errors during registry construction. The process must not serve
/// traffic if one of these occurs.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("No tools registered; refusing to start")]
    NoTools,

    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),
}

/// One invocable capability.
///
/// `invoke` takes the raw action input text and returns the observation
/// text. Malformed input is signalled with an error; the agent loop folds
/// it into the observation rather than aborting the request.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique human-readable identifier, used for display and matching.
    fn name(&self) -> &str;

    /// Natural-language usage contract shown to the model.
    fn description(&self) -> &str;

    async fn invoke(&self, input: &str) -> anyhow::Result<String>;
}

/// Build the standardized tool description shown to the model.
///
/// Deterministic template expansion; all inputs are author-supplied
/// strings, not user input.
pub fn describe(name: &str, input_format: &str, example_input: &str, example_output: &str) -> String {
    format!(
        "Use this tool to perform a specific task.\n\
         Call this tool using 'Action: {name}' and pass the input as 'Action Input: {input_format}'.\n\
         Example usage:\n\
         Question: {example_input}\n\
         Thought: I should use {name}.\n\
         Action: {name}\n\
         Action Input: {input_format}\n\
         Observation: {TERMINAL_MARKER} {example_output}\n\
         The agent must stop after seeing '{TERMINAL_MARKER}'."
    )
}

/// The set of available tools, built once at startup and read-only after.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    /// Build a registry from an explicit tool list.
    ///
    /// # Errors
    ///
    /// Returns `StartupError::DuplicateTool` if two tools share a name, or
    /// `StartupError::NoTools` if the list is empty.
    pub fn from_tools(tools: Vec<Arc<dyn Tool>>) -> Result<Self, StartupError> {
        let mut seen = HashSet::new();
        for tool in &tools {
            if !seen.insert(tool.name().to_string()) {
                return Err(StartupError::DuplicateTool(tool.name().to_string()));
            }
        }
        if tools.is_empty() {
            return Err(StartupError::NoTools);
        }

        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        info!("Registered {} tool(s): {:?}", tools.len(), names);

        Ok(Self { tools })
    }

    /// The compiled-in tool set.
    pub fn builtin() -> Result<Self, StartupError> {
        Self::from_tools(vec![
            Arc::new(FactorialCalculator::new()),
            Arc::new(FibonacciCalculator::new()),
            Arc::new(ComputeExpression::new()),
        ])
    }

    /// Look up a tool by its exact canonical name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// All registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Join all tool descriptions into the catalog embedded in prompts.
    pub fn catalog(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("- **{}**: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registers_all_tools() {
        let registry = ToolRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.get("Factorial Calculator").is_some());
        assert!(registry.get("Fibonacci Calculator").is_some());
        assert!(registry.get("Compute Expression").is_some());
    }

    #[test]
    fn test_empty_registry_is_fatal() {
        let err = ToolRegistry::from_tools(vec![]).unwrap_err();
        assert!(matches!(err, StartupError::NoTools));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = ToolRegistry::from_tools(vec![
            Arc::new(FactorialCalculator::new()),
            Arc::new(FactorialCalculator::new()),
        ])
        .unwrap_err();
        assert!(matches!(err, StartupError::DuplicateTool(name) if name == "Factorial Calculator"));
    }

    #[test]
    fn test_describe_template() {
        let desc = describe("Compute Expression", "<a> <b> <c>", "Compute 10 - 3 * 2", "4");
        assert!(desc.contains("Action: Compute Expression"));
        assert!(desc.contains("Action Input: <a> <b> <c>"));
        assert!(desc.contains("Final Answer: 4"));
        assert!(desc.contains("must stop after seeing 'Final Answer:'"));
    }

    #[test]
    fn test_catalog_lists_every_tool() {
        let registry = ToolRegistry::builtin().unwrap();
        let catalog = registry.catalog();
        for name in registry.names() {
            assert!(catalog.contains(name));
        }
    }
}
