//! Error types for tool dispatch.

use antdoc_core::HarvestError;
use thiserror::Error;

/// Errors surfaced to clients as JSON-RPC error envelopes.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Request line is not a JSON object of the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown method {0}")]
    MethodNotFound(String),

    #[error("Unknown tool {0}")]
    ToolNotFound(String),

    /// Harvesting failed while serving a call
    #[error("Internal error: {0}")]
    Harvest(#[from] HarvestError),

    /// Tool arguments did not deserialize, or a result did not serialize
    #[error("Internal error: {0}")]
    Arguments(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    /// JSON-RPC error code for this error.
    pub fn error_code(&self) -> i32 {
        match self {
            ToolError::Parse(_) => -32700,
            ToolError::MethodNotFound(_) | ToolError::ToolNotFound(_) => -32601,
            ToolError::Harvest(_) | ToolError::Arguments(_) | ToolError::Io(_) => -32603,
        }
    }
}
