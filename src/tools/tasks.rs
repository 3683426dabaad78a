use super::common::{
    invalid_argument_result, journal_tool_result, json_tool_result, required_string,
};
use super::traits::{ExecutionContext, Tool, ToolResult};
use crate::journal::Journal;
use serde_json::{Value, json};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Turn each objective on the current draft into an open task.
pub struct CreateTasksFromObjectivesTool {
    journal: Arc<Journal>,
}

impl CreateTasksFromObjectivesTool {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Tool for CreateTasksFromObjectivesTool {
    fn name(&self) -> &str {
        "create_tasks_from_objectives"
    }

    fn description(&self) -> &str {
        "Create one task per objective in the current check-in draft."
    }

    fn parameters_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    fn execute<'a>(
        &'a self,
        _args: Value,
        _ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move { journal_tool_result(self.journal.create_tasks_from_objectives()) })
    }
}

pub struct ListTasksTool {
    journal: Arc<Journal>,
}

impl ListTasksTool {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Tool for ListTasksTool {
    fn name(&self) -> &str {
        "list_tasks"
    }

    fn description(&self) -> &str {
        "List every task, open and done."
    }

    fn parameters_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    fn execute<'a>(
        &'a self,
        _args: Value,
        _ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move { json_tool_result(&self.journal.tasks().list()) })
    }
}

pub struct MarkTaskDoneTool {
    journal: Arc<Journal>,
}

impl MarkTaskDoneTool {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Tool for MarkTaskDoneTool {
    fn name(&self) -> &str {
        "mark_task_done"
    }

    fn description(&self) -> &str {
        "Mark a task as done by id."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "task_id": {
                    "type": "string",
                    "description": "Id of the task to complete"
                }
            },
            "required": ["task_id"]
        })
    }

    fn execute<'a>(
        &'a self,
        args: Value,
        _ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let task_id = match required_string(self.name(), &args, "task_id") {
                Ok(id) => id,
                Err(error) => return Ok(invalid_argument_result(&error)),
            };
            journal_tool_result(self.journal.tasks().mark_done(&task_id))
        })
    }
}
