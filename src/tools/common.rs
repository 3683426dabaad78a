use super::traits::ToolResult;
use crate::error::{JournalError, ToolError};
use serde::Serialize;
use serde_json::{Map, Value, json};

pub(crate) fn failed_tool_result(message: impl Into<String>) -> ToolResult {
    ToolResult {
        success: false,
        output: String::new(),
        error: Some(message.into()),
    }
}

pub(crate) fn json_tool_result<T: Serialize>(payload: &T) -> anyhow::Result<ToolResult> {
    Ok(ToolResult {
        success: true,
        output: serde_json::to_string_pretty(payload)?,
        error: None,
    })
}

/// `{error, message}` body for a caller-visible journal condition.
pub(crate) fn journal_error_result(error: &JournalError) -> ToolResult {
    let payload = json!({
        "error": error.code(),
        "message": error.to_string(),
    });
    ToolResult {
        success: false,
        output: payload.to_string(),
        error: Some(error.to_string()),
    }
}

/// Storage faults escape as `Err`; everything else becomes a tool result.
pub(crate) fn journal_tool_result<T: Serialize>(
    result: Result<T, JournalError>,
) -> anyhow::Result<ToolResult> {
    match result {
        Ok(payload) => json_tool_result(&payload),
        Err(JournalError::Storage(error)) => {
            Err(anyhow::Error::new(error).context("journal write failed"))
        }
        Err(error) => Ok(journal_error_result(&error)),
    }
}

pub(crate) fn invalid_argument_result(error: &ToolError) -> ToolResult {
    failed_tool_result(error.to_string())
}

fn invalid_argument(tool: &str, argument: &str, message: impl Into<String>) -> ToolError {
    ToolError::InvalidArgument {
        name: tool.to_string(),
        argument: argument.to_string(),
        message: message.into(),
    }
}

fn args_map(args: &Value) -> Option<&Map<String, Value>> {
    args.as_object()
}

fn arg<'a>(args: &'a Value, key: &str) -> Option<&'a Value> {
    args_map(args)
        .and_then(|map| map.get(key))
        .filter(|value| !value.is_null())
}

pub(crate) fn required_string(tool: &str, args: &Value, key: &str) -> Result<String, ToolError> {
    match arg(args, key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(invalid_argument(tool, key, "expected a string")),
        None => Err(invalid_argument(tool, key, "missing required argument")),
    }
}

pub(crate) fn optional_string(
    tool: &str,
    args: &Value,
    key: &str,
) -> Result<Option<String>, ToolError> {
    match arg(args, key) {
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(invalid_argument(tool, key, "expected a string")),
        None => Ok(None),
    }
}

/// Scalars are stringified so `{"value": 7}` works like `{"value": "7"}`.
pub(crate) fn optional_scalar_as_string(
    tool: &str,
    args: &Value,
    key: &str,
) -> Result<Option<String>, ToolError> {
    match arg(args, key) {
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(Value::Number(value)) => Ok(Some(value.to_string())),
        Some(Value::Bool(value)) => Ok(Some(value.to_string())),
        Some(_) => Err(invalid_argument(tool, key, "expected a scalar or null")),
        None => Ok(None),
    }
}

pub(crate) fn optional_i64(tool: &str, args: &Value, key: &str) -> Result<Option<i64>, ToolError> {
    match arg(args, key) {
        Some(Value::Number(number)) => number
            .as_i64()
            .map(Some)
            .ok_or_else(|| invalid_argument(tool, key, "expected an integer")),
        Some(Value::String(raw)) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| invalid_argument(tool, key, "expected an integer")),
        Some(_) => Err(invalid_argument(tool, key, "expected an integer")),
        None => Ok(None),
    }
}

pub(crate) fn bool_or(
    tool: &str,
    args: &Value,
    key: &str,
    default: bool,
) -> Result<bool, ToolError> {
    match arg(args, key) {
        Some(Value::Bool(value)) => Ok(*value),
        Some(Value::String(raw)) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(invalid_argument(tool, key, "expected a boolean")),
        },
        Some(_) => Err(invalid_argument(tool, key, "expected a boolean")),
        None => Ok(default),
    }
}
