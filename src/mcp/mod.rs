//! MCP (Model Context Protocol) subsystem.
//!
//! Exposes the journal tools to an agent over stdio.

pub mod protocol;
pub mod server;

pub use protocol::{CallToolResult, MCP_PROTOCOL_VERSION, RpcError, ToolContent};
pub use server::McpServer;
