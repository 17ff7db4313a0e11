//! Error types for the remote store client.

use expensify_core::ExpensifyError;
use thiserror::Error;

/// Errors that can occur when talking to the realtime database.
#[derive(Error, Debug)]
pub enum RemoteClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Store returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Store rejected the credentials (401/403)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Nothing exists at the requested location
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid database URL
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse store response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Store is offline or unreachable
    #[error("Server unreachable: {0}")]
    Unreachable(String),
}

/// Result type for remote client operations.
pub type Result<T> = std::result::Result<T, RemoteClientError>;

impl From<RemoteClientError> for ExpensifyError {
    fn from(err: RemoteClientError) -> Self {
        match err {
            RemoteClientError::Request(e) => ExpensifyError::network(e.to_string()),
            RemoteClientError::Unreachable(msg) => ExpensifyError::network(msg),
            RemoteClientError::PermissionDenied(msg) => ExpensifyError::permission_denied(msg),
            RemoteClientError::NotFound(path) => ExpensifyError::not_found("Path", path),
            RemoteClientError::ServerError { status, message } => {
                ExpensifyError::Remote { status, message }
            }
            RemoteClientError::InvalidUrl(msg) => ExpensifyError::invalid_input(msg),
            RemoteClientError::ParseError(msg) => {
                ExpensifyError::Other(format!("Failed to parse response: {}", msg))
            }
        }
    }
}
