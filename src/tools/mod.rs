//! Tool registry and tool trait.
//!
//! Tools take a single string argument and produce a single string result.
//! A tool `Err` never propagates out of the dispatch path; the registry
//! renders it into an error-string observation.

mod search;

pub use search::WebSearch;

use std::sync::Arc;

use async_trait::async_trait;

/// A callable the agent can dispatch an action to.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, matched against the parsed action name.
    fn name(&self) -> &str;

    /// One-line description embedded into the prompt catalog.
    fn description(&self) -> &str;

    /// Run the tool on the given input.
    async fn call(&self, input: &str) -> anyhow::Result<String>;
}

/// Adapter registering a plain closure as a [`Tool`].
pub struct FnTool<F> {
    name: String,
    description: String,
    func: F,
}

#[async_trait]
impl<F> Tool for FnTool<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn call(&self, input: &str) -> anyhow::Result<String> {
        Ok((self.func)(input))
    }
}

/// Registry of available tools, in registration order.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A tool with the same name replaces the earlier one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    /// Register a closure under a name and description.
    pub fn register_fn(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        func: impl Fn(&str) -> String + Send + Sync + 'static,
    ) {
        self.register(Arc::new(FnTool {
            name: name.into(),
            description: description.into(),
            func,
        }));
    }

    /// Find a tool by name.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Human-readable catalog embedded into the prompt.
    pub fn describe_all(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("- **{}**: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}
