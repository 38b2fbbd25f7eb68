//! Registrar API error types.

use thiserror::Error;

/// Errors raised while talking to the DNSimple API.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("API Error {status}: {body}")]
    Status { status: u16, body: String },

    /// The API answered, but not with the shape we expect.
    #[error("Invalid API response: {0}")]
    MalformedResponse(String),

    /// The token is valid but no account is reachable with it.
    #[error("No accounts found. You may need to create an account first.")]
    NoAccount,

    /// The server kept reporting more pages past the configured cap.
    #[error("Pagination of {path} exceeded {limit} pages")]
    PageLimitExceeded { path: String, limit: u32 },
}

impl RegistrarError {
    /// Create a new transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new malformed response error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Status code carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = RegistrarError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API Error 401: unauthorized");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_transport_error_has_no_status() {
        assert_eq!(RegistrarError::transport("timed out").status(), None);
    }
}
