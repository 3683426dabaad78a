use super::common::{
    bool_or, invalid_argument_result, journal_tool_result, json_tool_result,
    optional_scalar_as_string, optional_string, required_string,
};
use super::traits::{ExecutionContext, Tool, ToolResult};
use crate::journal::{CheckinField, Journal};
use serde_json::{Value, json};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Stage one field of the in-progress check-in and snapshot it to disk.
pub struct SetCheckinFieldTool {
    journal: Arc<Journal>,
}

impl SetCheckinFieldTool {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Tool for SetCheckinFieldTool {
    fn name(&self) -> &str {
        "set_checkin_field"
    }

    fn description(&self) -> &str {
        "Set one field on the current check-in draft. Starts a new check-in if none is active."
    }

    fn parameters_schema(&self) -> Value {
        let fields: Vec<String> = CheckinField::ALL.iter().map(ToString::to_string).collect();
        json!({
            "type": "object",
            "properties": {
                "field": {
                    "type": "string",
                    "enum": fields,
                    "description": "Draft field to update"
                },
                "value": {
                    "type": ["string", "number", "boolean", "null"],
                    "description": "New value. Null or omitted clears a text field; mood_score takes an integer 0-10; objectives takes a comma-separated list"
                }
            },
            "required": ["field"]
        })
    }

    fn execute<'a>(
        &'a self,
        args: Value,
        _ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let field = match required_string(self.name(), &args, "field") {
                Ok(field) => field,
                Err(error) => return Ok(invalid_argument_result(&error)),
            };
            let value = match optional_scalar_as_string(self.name(), &args, "value") {
                Ok(value) => value,
                Err(error) => return Ok(invalid_argument_result(&error)),
            };

            journal_tool_result(
                self.journal
                    .checkins()
                    .set_field(&field, value.as_deref()),
            )
        })
    }
}

pub struct GetCurrentCheckinTool {
    journal: Arc<Journal>,
}

impl GetCurrentCheckinTool {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Tool for GetCurrentCheckinTool {
    fn name(&self) -> &str {
        "get_current_checkin"
    }

    fn description(&self) -> &str {
        "Return the current check-in draft and its metadata."
    }

    fn parameters_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    fn execute<'a>(
        &'a self,
        _args: Value,
        _ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move { json_tool_result(&self.journal.checkins().current()) })
    }
}

/// Append the draft to history. Repeating a `client_entry_id` is a no-op.
pub struct SaveCheckinTool {
    journal: Arc<Journal>,
}

impl SaveCheckinTool {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Tool for SaveCheckinTool {
    fn name(&self) -> &str {
        "save_checkin"
    }

    fn description(&self) -> &str {
        "Save the current draft as a history entry. Pass client_entry_id to make retries idempotent."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "client_entry_id": {
                    "type": "string",
                    "description": "Caller-chosen idempotency key"
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
            let client_entry_id = match optional_string(self.name(), &args, "client_entry_id") {
                Ok(id) => id,
                Err(error) => return Ok(invalid_argument_result(&error)),
            };
            journal_tool_result(self.journal.checkins().save(client_entry_id.as_deref()))
        })
    }
}

pub struct FinalizeCheckinTool {
    journal: Arc<Journal>,
}

impl FinalizeCheckinTool {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Tool for FinalizeCheckinTool {
    fn name(&self) -> &str {
        "finalize_checkin"
    }

    fn description(&self) -> &str {
        "Save the draft (using its own client_entry_id) and mark the check-in complete."
    }

    fn parameters_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    fn execute<'a>(
        &'a self,
        _args: Value,
        _ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move { journal_tool_result(self.journal.checkins().finalize()) })
    }
}

pub struct ResetCurrentCheckinTool {
    journal: Arc<Journal>,
}

impl ResetCurrentCheckinTool {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Tool for ResetCurrentCheckinTool {
    fn name(&self) -> &str {
        "reset_current_checkin"
    }

    fn description(&self) -> &str {
        "Discard the active check-in. Draft fields are cleared unless clear_fields is false."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "clear_fields": {
                    "type": "boolean",
                    "description": "Clear draft fields as well as metadata (default true)"
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
            let clear_fields = match bool_or(self.name(), &args, "clear_fields", true) {
                Ok(clear) => clear,
                Err(error) => return Ok(invalid_argument_result(&error)),
            };
            json_tool_result(&self.journal.checkins().reset(clear_fields))
        })
    }
}

pub struct GetCheckinFileInfoTool {
    journal: Arc<Journal>,
}

impl GetCheckinFileInfoTool {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl Tool for GetCheckinFileInfoTool {
    fn name(&self) -> &str {
        "get_checkin_file_info"
    }

    fn description(&self) -> &str {
        "Describe the snapshot file of the active check-in."
    }

    fn parameters_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    fn execute<'a>(
        &'a self,
        _args: Value,
        _ctx: &'a ExecutionContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move { journal_tool_result(self.journal.checkins().file_info()) })
    }
}
