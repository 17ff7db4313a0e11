/// Core error types for Expensify
use thiserror::Error;

/// Result type alias using `ExpensifyError`
pub type Result<T> = std::result::Result<T, ExpensifyError>;

/// Error reported by a remote store or raised while shaping its data
#[derive(Error, Debug)]
pub enum ExpensifyError {
    /// The store could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The store rejected the request for the current credentials
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The store answered with an unexpected status
    #[error("Remote store error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl ExpensifyError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
