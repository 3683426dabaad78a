use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

/// Result of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

/// Description of a tool for the LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Per-invocation metadata threaded through middleware and tools.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub call_id: String,
    pub caller: String,
}

impl ExecutionContext {
    pub fn new(caller: impl Into<String>) -> Self {
        Self {
            call_id: Uuid::new_v4().to_string(),
            caller: caller.into(),
        }
    }
}

#[cfg(test)]
impl ExecutionContext {
    pub fn test_default() -> Self {
        Self::new("test")
    }
}

/// Core tool trait, one implementation per exposed operation
pub trait Tool: Send + Sync {
    /// Tool name (used in LLM function calling)
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// JSON schema for parameters
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with given arguments.
    ///
    /// Caller mistakes come back as an unsuccessful `ToolResult`; `Err` is
    /// reserved for storage faults.
    fn execute<'a>(
        &'a self,
        args: Value,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>>;

    /// Get the full spec for LLM registration
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

#[derive(Debug)]
pub enum MiddlewareDecision {
    Continue,
    Block(String),
}

pub trait ToolMiddleware: Send + Sync + std::fmt::Debug {
    fn before_execute<'a>(
        &'a self,
        tool_name: &'a str,
        args: &'a Value,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<MiddlewareDecision>> + Send + 'a>>;

    fn after_execute<'a>(
        &'a self,
        tool_name: &'a str,
        result: &'a mut ToolResult,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}
