//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur before a tool handler runs.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not in the catalog.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// The arguments do not match the tool's input schema.
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }
}
