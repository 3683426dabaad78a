use super::common::{invalid_argument_result, journal_tool_result, json_tool_result, optional_i64};
use super::traits::{ExecutionContext, Tool, ToolResult};
use crate::journal::Journal;
use crate::journal::views::DEFAULT_SUMMARY_DAYS;
use serde_json::{Value, json};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub struct GetLastCheckinTool {
    journal: Arc<Journal>,
}

impl GetLastCheckinTool {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Tool for GetLastCheckinTool {
    fn name(&self) -> &str {
        "get_last_checkin"
    }

    fn description(&self) -> &str {
        "Return the most recently saved check-in."
    }

    fn parameters_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    fn execute<'a>(
        &'a self,
        _args: Value,
        _ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move { journal_tool_result(self.journal.last_entry()) })
    }
}

pub struct GetHistoryTool {
    journal: Arc<Journal>,
}

impl GetHistoryTool {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Tool for GetHistoryTool {
    fn name(&self) -> &str {
        "get_history"
    }

    fn description(&self) -> &str {
        "Return saved check-ins in chronological order, optionally only the last `limit`."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Return only the most recent N entries"
                }
            }
        })
    }

    fn execute<'a>(
        &'a self,
        args: Value,
        _ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let limit = match optional_i64(self.name(), &args, "limit") {
                Ok(limit) => limit,
                Err(error) => return Ok(invalid_argument_result(&error)),
            };
            json_tool_result(&self.journal.history(limit))
        })
    }
}

/// Mood trend over the most recent entries.
pub struct SummaryTool {
    journal: Arc<Journal>,
}

impl SummaryTool {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Tool for SummaryTool {
    fn name(&self) -> &str {
        "summary"
    }

    fn description(&self) -> &str {
        "Summarize recent check-ins: average mood score and how many had objectives."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "days": {
                    "type": "integer",
                    "description": "Number of most recent entries to consider (default 7, <= 0 means all)"
                }
            }
        })
    }

    fn execute<'a>(
        &'a self,
        args: Value,
        _ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let days = match optional_i64(self.name(), &args, "days") {
                Ok(days) => days.unwrap_or(DEFAULT_SUMMARY_DAYS),
                Err(error) => return Ok(invalid_argument_result(&error)),
            };
            json_tool_result(&self.journal.summary(days))
        })
    }
}
