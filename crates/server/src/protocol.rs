//! JSON-RPC 2.0 envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;

/// JSON-RPC request
///
/// Every field is optional and untyped on the wire; a missing `id` echoes
/// back as `null` and a missing or non-string `method` is reported as an
/// unknown method.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Value,
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub method: Value,
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    /// Parses one request line. Only text that is not JSON, or JSON that is
    /// not an object, is rejected.
    pub fn from_line(line: &str) -> Result<Self, ToolError> {
        let value: Value = serde_json::from_str(line).map_err(|e| ToolError::Parse(e.to_string()))?;
        if !value.is_object() {
            return Err(ToolError::Parse("expected a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| ToolError::Parse(e.to_string()))
    }
}

/// JSON-RPC response (success)
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    pub result: Value,
}

/// JSON-RPC error response
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub jsonrpc: String,
    pub id: Value,
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn new(id: Value, result: Value) -> Self {
        Self { jsonrpc: "2.0".to_string(), id, result }
    }
}

impl JsonRpcError {
    pub fn new(id: Value, code: i32, message: String) -> Self {
        Self { jsonrpc: "2.0".to_string(), id, error: ErrorDetail { code, message } }
    }
}

/// Either kind of response line.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Result(JsonRpcResponse),
    Error(JsonRpcError),
}

impl Envelope {
    pub fn result(id: Value, result: Value) -> Self {
        Envelope::Result(JsonRpcResponse::new(id, result))
    }

    pub fn error(id: Value, error: &ToolError) -> Self {
        Envelope::Error(JsonRpcError::new(id, error.error_code(), error.to_string()))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Error(_))
    }

    pub fn id(&self) -> &Value {
        match self {
            Envelope::Result(response) => &response.id,
            Envelope::Error(error) => &error.id,
        }
    }
}

/// `tools/list` result
#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolDefinition>,
}

/// Tool definition
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the `arguments` object
    pub input_schema: Value,
}
