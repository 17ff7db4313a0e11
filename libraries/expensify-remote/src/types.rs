//! Types for the realtime database REST API.

use serde::Deserialize;

/// Configuration for connecting to a realtime database.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the database (e.g., "https://my-app.firebaseio.com")
    pub url: String,
    /// ID token sent as the `auth` query parameter (if authenticated)
    pub auth_token: Option<String>,
}

impl RemoteConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: None,
        }
    }

    /// Create a config with an existing auth token.
    pub fn with_token(url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: Some(auth_token.into()),
        }
    }
}

/// Response body of a `POST` (push).
#[derive(Debug, Deserialize)]
pub struct PushResponse {
    /// Generated child key
    pub name: String,
}

/// Error body returned by the database, e.g. `{"error": "Permission denied"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
