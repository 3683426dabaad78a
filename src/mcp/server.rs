//! Newline-delimited JSON-RPC tool server.
//!
//! One message (or batch) per line in, one response line out. Notifications
//! and client responses produce nothing. A failing tool only fails its own
//! request; the loop keeps serving until the input closes.

use super::protocol::{
    CallToolResult, MCP_PROTOCOL_VERSION, RpcError, ToolDescriptor, error_response,
    success_response,
};
use crate::config::ServerConfig;
use crate::error::ProtocolError;
use crate::tools::{ExecutionContext, ToolRegistry};
use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

pub struct McpServer {
    registry: ToolRegistry,
    identity: ServerConfig,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, identity: ServerConfig) -> Self {
        Self { registry, identity }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub async fn serve_stdio(&self) -> Result<(), ProtocolError> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<(), ProtocolError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            server = %self.identity.name,
            tools = self.registry.len(),
            "tool server listening on stdio"
        );

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await.map_err(ProtocolError::Read)? {
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };
            let mut encoded = response.to_string();
            encoded.push('\n');
            writer
                .write_all(encoded.as_bytes())
                .await
                .map_err(ProtocolError::Write)?;
            writer.flush().await.map_err(ProtocolError::Write)?;
        }

        info!("input closed, tool server stopping");
        Ok(())
    }

    /// Handle one raw line. Blank lines are skipped.
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(incoming) => self.handle_incoming_message(incoming).await,
            Err(err) => {
                warn!(error = %err, "unparseable message");
                Some(error_response(
                    Value::Null,
                    RpcError::parse_error(format!("Parse error: {err}")),
                ))
            }
        }
    }

    pub async fn handle_incoming_message(&self, incoming: Value) -> Option<Value> {
        let Value::Array(batch) = incoming else {
            return self.handle_single_message(incoming).await;
        };

        if batch.is_empty() {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Batch request must not be empty"),
            ));
        }

        let mut responses = Vec::with_capacity(batch.len());
        for item in batch {
            if let Some(response) = self.handle_single_message(item).await {
                responses.push(response);
            }
        }
        (!responses.is_empty()).then_some(Value::Array(responses))
    }

    async fn handle_single_message(&self, incoming: Value) -> Option<Value> {
        let Some(obj) = incoming.as_object() else {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Request must be a JSON object"),
            ));
        };

        if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            let id = obj.get("id").cloned().unwrap_or(Value::Null);
            return Some(error_response(
                id,
                RpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        // Without a method this is a response to something we never sent.
        let method = obj.get("method").and_then(Value::as_str)?;

        let params = obj.get("params").cloned().unwrap_or(Value::Null);
        let Some(id) = obj.get("id").cloned() else {
            debug!(method, "notification ignored");
            return None;
        };

        Some(match self.handle_request(method, params).await {
            Ok(payload) => success_response(id, payload),
            Err(err) => error_response(id, err),
        })
    }

    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(self.initialize_payload()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.tools_list_payload()),
            "tools/call" => self.handle_tools_call(params).await,
            _ => Err(RpcError::method_not_found(method)),
        }
    }

    fn initialize_payload(&self) -> Value {
        let mut payload = json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": self.identity.name,
                "version": env!("CARGO_PKG_VERSION")
            }
        });
        if !self.identity.instructions.trim().is_empty() {
            payload["instructions"] = Value::String(self.identity.instructions.clone());
        }
        payload
    }

    fn tools_list_payload(&self) -> Value {
        let tools: Vec<ToolDescriptor> = self
            .registry
            .specs()
            .into_iter()
            .map(ToolDescriptor::from)
            .collect();
        json!({ "tools": tools })
    }

    async fn handle_tools_call(&self, params: Value) -> Result<Value, RpcError> {
        let params = params
            .as_object()
            .ok_or_else(|| RpcError::invalid_params("tools/call params must be an object"))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("tools/call requires string field 'name'"))?;

        let args = match params.get("arguments") {
            Some(Value::Object(map)) => Value::Object(map.clone()),
            Some(Value::Null) | None => Value::Object(Map::new()),
            Some(_) => {
                return Err(RpcError::invalid_params(
                    "tools/call 'arguments' must be an object",
                ));
            }
        };

        let ctx = ExecutionContext::new("stdio");
        match self.registry.execute(name, args, &ctx).await {
            Ok(result) => serde_json::to_value(CallToolResult::from(result))
                .map_err(|err| RpcError::internal(err.to_string())),
            Err(err) => {
                let message = format!("{err:#}");
                error!(tool = name, call_id = %ctx.call_id, error = %message, "tool call failed");
                Err(RpcError::internal(message))
            }
        }
    }
}
