//! Error types and handling for the MCP server.
//!
//! Tool-level failures never reach this type: they become error envelopes.
//! `Error` covers startup, configuration and the blocking tool pool.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
