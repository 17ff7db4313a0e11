//! REST client for a Firebase-compatible realtime database.

use crate::error::{RemoteClientError, Result};
use crate::types::{ErrorBody, PushResponse, RemoteConfig};
use async_trait::async_trait;
use expensify_core::{RemoteStore, Snapshot, StorePath};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

/// Client for the realtime database REST API.
///
/// Every location is addressed as `{url}/{path}.json`. When an auth token is
/// configured it is appended as the `auth` query parameter.
///
/// # Example
///
/// ```ignore
/// use expensify_remote::{RemoteConfig, RemoteStoreClient};
///
/// let client = RemoteStoreClient::new(RemoteConfig::new("https://my-app.firebaseio.com"))?;
/// client.set_auth_token(Some(id_token)).await;
/// ```
pub struct RemoteStoreClient {
    http: Client,
    config: Arc<RwLock<RemoteConfig>>,
}

impl RemoteStoreClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(RemoteClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(RemoteClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&url).map_err(|e| RemoteClientError::InvalidUrl(e.to_string()))?;

        let normalized_config = RemoteConfig {
            url,
            auth_token: config.auth_token,
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Expensify/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RemoteClientError::Request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized_config)),
        })
    }

    /// Get the database URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an auth token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.auth_token.is_some()
    }

    /// Replace (or clear) the auth token used for subsequent requests.
    pub async fn set_auth_token(&self, auth_token: Option<String>) {
        let mut config = self.config.write().await;
        config.auth_token = auth_token;
        if config.auth_token.is_none() {
            info!("Cleared remote store credentials");
        }
    }

    /// `POST` a value under `path`, returning the generated key.
    pub async fn post(&self, path: &StorePath, value: &Value) -> Result<String> {
        let request = self.request(reqwest::Method::POST, path).await?;
        debug!(path = %path, "Pushing value");

        let response = request.json(value).send().await.map_err(map_send_error)?;
        let response = check_status(response, path).await?;

        let pushed: PushResponse = response.json().await.map_err(|e| {
            RemoteClientError::ParseError(format!("Failed to parse push response: {}", e))
        })?;

        debug!(path = %path, key = %pushed.name, "Value pushed");
        Ok(pushed.name)
    }

    /// `PATCH` the given fields of the node at `path`.
    pub async fn patch(&self, path: &StorePath, updates: &Map<String, Value>) -> Result<()> {
        let request = self.request(reqwest::Method::PATCH, path).await?;
        debug!(path = %path, fields = updates.len(), "Updating node");

        let response = request.json(updates).send().await.map_err(map_send_error)?;
        check_status(response, path).await?;

        Ok(())
    }

    /// `DELETE` the node at `path`.
    pub async fn delete(&self, path: &StorePath) -> Result<()> {
        let request = self.request(reqwest::Method::DELETE, path).await?;
        debug!(path = %path, "Removing node");

        let response = request.send().await.map_err(map_send_error)?;
        check_status(response, path).await?;

        Ok(())
    }

    /// `GET` the node at `path`; `Value::Null` when nothing is stored.
    pub async fn get(&self, path: &StorePath) -> Result<Value> {
        let request = self.request(reqwest::Method::GET, path).await?;
        debug!(path = %path, "Reading node");

        let response = request.send().await.map_err(map_send_error)?;
        let response = check_status(response, path).await?;

        let value: Value = response.json().await.map_err(|e| {
            RemoteClientError::ParseError(format!("Failed to parse snapshot: {}", e))
        })?;

        Ok(value)
    }

    async fn request(&self, method: reqwest::Method, path: &StorePath) -> Result<RequestBuilder> {
        let config = self.config.read().await;
        let url = endpoint(&config.url, path)?;
        let auth_token = config.auth_token.clone();
        drop(config);

        let mut request = self.http.request(method, url);
        if let Some(token) = auth_token {
            request = request.query(&[("auth", token)]);
        }
        Ok(request)
    }
}

#[async_trait]
impl RemoteStore for RemoteStoreClient {
    async fn push(&self, path: &StorePath, value: Value) -> expensify_core::Result<String> {
        Ok(self.post(path, &value).await?)
    }

    async fn update(
        &self,
        path: &StorePath,
        updates: Map<String, Value>,
    ) -> expensify_core::Result<()> {
        Ok(self.patch(path, &updates).await?)
    }

    async fn remove(&self, path: &StorePath) -> expensify_core::Result<()> {
        Ok(self.delete(path).await?)
    }

    async fn once(&self, path: &StorePath) -> expensify_core::Result<Snapshot> {
        let value = self.get(path).await?;
        Ok(Snapshot::new(Some(path.key().to_string()), value))
    }
}

/// Build `{base}/{path}.json`, percent-encoding each segment.
fn endpoint(base: &str, path: &StorePath) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| RemoteClientError::InvalidUrl(e.to_string()))?;

    let mut parts: Vec<&str> = path.segments().collect();
    let last = format!("{}.json", parts.pop().unwrap_or_default());

    url.path_segments_mut()
        .map_err(|()| RemoteClientError::InvalidUrl(format!("{} cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(parts)
        .push(&last);

    Ok(url)
}

fn map_send_error(e: reqwest::Error) -> RemoteClientError {
    if e.is_connect() || e.is_timeout() {
        RemoteClientError::Unreachable(e.to_string())
    } else {
        RemoteClientError::Request(e)
    }
}

async fn check_status(response: Response, path: &StorePath) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);

    warn!(status = %status, path = %path, error = %message, "Remote store rejected request");

    match status.as_u16() {
        401 | 403 => Err(RemoteClientError::PermissionDenied(message)),
        404 => Err(RemoteClientError::NotFound(path.to_string())),
        code => Err(RemoteClientError::ServerError {
            status: code,
            message,
        }),
    }
}
