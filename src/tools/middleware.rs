use super::traits::{ExecutionContext, MiddlewareDecision, ToolMiddleware, ToolResult};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

// ── AuditMiddleware ─────────────────────────────────────────────────

#[derive(Debug)]
pub struct AuditMiddleware;

impl ToolMiddleware for AuditMiddleware {
    fn before_execute<'a>(
        &'a self,
        tool_name: &'a str,
        _args: &'a Value,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<MiddlewareDecision>> + Send + 'a>> {
        Box::pin(async move {
            tracing::info!(
                tool = tool_name,
                call_id = %ctx.call_id,
                caller = %ctx.caller,
                "tool execution started"
            );
            Ok(MiddlewareDecision::Continue)
        })
    }

    fn after_execute<'a>(
        &'a self,
        tool_name: &'a str,
        result: &'a mut ToolResult,
        ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            tracing::info!(
                tool = tool_name,
                call_id = %ctx.call_id,
                success = result.success,
                has_error = result.error.is_some(),
                "tool execution finished"
            );
        })
    }
}

// ── ArgumentShapeMiddleware ─────────────────────────────────────────

/// Tools take a JSON object (or nothing). Anything else is refused up front.
#[derive(Debug)]
pub struct ArgumentShapeMiddleware;

impl ToolMiddleware for ArgumentShapeMiddleware {
    fn before_execute<'a>(
        &'a self,
        tool_name: &'a str,
        args: &'a Value,
        _ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<MiddlewareDecision>> + Send + 'a>> {
        Box::pin(async move {
            if args.is_object() || args.is_null() {
                return Ok(MiddlewareDecision::Continue);
            }
            Ok(MiddlewareDecision::Block(format!(
                "arguments for '{tool_name}' must be a JSON object"
            )))
        })
    }

    fn after_execute<'a>(
        &'a self,
        _tool_name: &'a str,
        _result: &'a mut ToolResult,
        _ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {})
    }
}

pub fn default_middleware_chain() -> Vec<Arc<dyn ToolMiddleware>> {
    vec![
        Arc::new(ArgumentShapeMiddleware),
        Arc::new(AuditMiddleware),
    ]
}
