//! Uniform result envelope returned by every tool.
//!
//! An envelope is a JSON object. Failures carry a top-level `"error"` string
//! and optionally `"message"` or `"response"` with details from the API;
//! anything else is a success. Each tool call produces exactly one envelope,
//! rendered as a single pretty-printed text block.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::error::ToolError;

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope(Value);

impl Envelope {
    /// Wrap a success payload.
    pub fn success(data: Value) -> Self {
        Self(data)
    }

    /// Serialize a typed success payload.
    pub fn from_serialize<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self(value),
            Err(e) => {
                warn!("Failed to serialize tool result: {}", e);
                Self::error(format!("Failed to serialize result: {e}"))
            }
        }
    }

    /// Create an error envelope.
    pub fn error(message: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("error".to_string(), Value::String(message.into()));
        Self(Value::Object(map))
    }

    /// Attach an extra field (e.g. `message`, `response`).
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Value::Object(map) = &mut self.0 {
            map.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn is_error(&self) -> bool {
        self.0.get("error").is_some_and(|e| !e.is_null())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Render as the single text block handed back to the host.
    pub fn to_text(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }

    pub fn into_call_tool_result(self) -> CallToolResult {
        let content = vec![Content::text(self.to_text())];
        if self.is_error() {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

impl From<ToolError> for Envelope {
    fn from(err: ToolError) -> Self {
        Self::error(err.to_string())
    }
}
