//! Structured errors for the wellness tool server.
//!
//! Library callers match on these to tell caller mistakes apart from
//! storage faults; glue code (CLI, dispatch) keeps using `anyhow::Result`
//! for context chains.

use std::path::PathBuf;
use thiserror::Error;

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Journal errors ─────────────────────────────────────────────────────────

/// Failures of check-in, history and task operations.
///
/// Everything except `Storage` is a caller-input condition and is reported
/// back to the agent as a regular tool result. `Storage` is a write fault
/// and aborts the current invocation.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Invalid field '{0}'")]
    InvalidField(String),

    #[error("{0}")]
    InvalidValue(String),

    #[error("no check-in has been started")]
    NoCheckinStarted,

    #[error("no entries in history")]
    NoEntries,

    #[error("task {0} not found")]
    TaskNotFound(String),

    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

impl JournalError {
    /// Stable machine code surfaced to the agent.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidField(_) => "invalid_field",
            Self::InvalidValue(_) => "invalid_value",
            Self::NoCheckinStarted => "no_checkin_started",
            Self::NoEntries => "no_entries",
            Self::TaskNotFound(_) => "task_not_found",
            Self::Storage(_) => "storage_error",
        }
    }

    pub fn is_storage_fault(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed replacing {} atomically: {source}", path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed preparing storage directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ─── Tool errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool {name} not found")]
    NotFound { name: String },

    #[error("tool {name} argument '{argument}' invalid: {message}")]
    InvalidArgument {
        name: String,
        argument: String,
        message: String,
    },
}

// ─── Protocol errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("failed to read message: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write message: {0}")]
    Write(#[source] std::io::Error),
}
