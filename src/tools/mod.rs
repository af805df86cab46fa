//! 工具注册表：按名称查找并调用本地工具处理器。
//!
//! Local tool handlers and the registry that routes function calls to them.
//!
//! The registry only checks that a handler exists. Argument validation is the
//! handler's job. Lookup failures and handler errors come back as structured
//! [`ToolResult`] failures, so a caller can forward them to the agent service
//! instead of aborting the conversation.

pub mod pizza;

pub use pizza::PizzaTool;

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::types::tool::{ToolDefinition, ToolResult};
use crate::{Error, Result};

/// A locally executed tool.
pub trait ToolHandler: Send + Sync {
    fn name(&self) -> &str;

    /// Declaration sent to the agent service.
    fn definition(&self) -> ToolDefinition;

    fn call(&self, arguments: Value) -> Result<Value>;
}

type ToolFn = dyn Fn(Value) -> Result<Value> + Send + Sync;

/// Adapter so plain closures can be registered.
struct FnTool {
    definition: ToolDefinition,
    func: Box<ToolFn>,
}

impl ToolHandler for FnTool {
    fn name(&self) -> &str {
        self.definition.name()
    }

    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    fn call(&self, arguments: Value) -> Result<Value> {
        (self.func)(arguments)
    }
}

#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolHandler>>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the pizza calculator registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PizzaTool::default());
        registry
    }

    /// Register a handler; a later registration under the same name replaces it.
    pub fn register(&mut self, tool: impl ToolHandler + 'static) {
        self.register_arc(Arc::new(tool));
    }

    pub fn register_arc(&mut self, tool: Arc<dyn ToolHandler>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            warn!(tool = %name, "replacing previously registered tool");
        }
    }

    pub fn register_fn<F>(&mut self, definition: ToolDefinition, func: F)
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.register(FnTool {
            definition,
            func: Box::new(func),
        });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Declarations of all registered tools, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.names()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Invoke `name` with `arguments`. Never fails: errors become failure results.
    pub fn invoke(&self, name: &str, arguments: Value) -> ToolResult {
        let Some(tool) = self.tools.get(name) else {
            warn!(tool = %name, "function call for unregistered tool");
            return ToolResult::failure(name, &Error::UnknownTool { name: name.to_string() });
        };

        debug!(tool = %name, %arguments, "invoking tool");
        match tool.call(arguments) {
            Ok(value) => ToolResult::success(name, value),
            Err(err) => {
                warn!(tool = %name, error = %err, "tool handler failed");
                ToolResult::failure(name, &err)
            }
        }
    }
}
