use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::errors::{ClientError, ClientResult};
use crate::navigation::NavigatorRef;
use crate::storage::KeyValueStoreRef;
use crate::types::{SESSION_KEYS, TOKEN_KEY};

/// Message used when a failed response carries no usable `error` or `detail`
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// Client for the FinWall backend API.
///
/// Every call reads the stored token to build its headers. A 401 from the
/// server clears the stored session and triggers a redirect to the login view.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    login_view: String,
    store: KeyValueStoreRef,
    navigator: NavigatorRef,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(
        config: &ClientConfig,
        store: KeyValueStoreRef,
        navigator: NavigatorRef,
    ) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            login_view: config.login_view().to_string(),
            store,
            navigator,
        })
    }

    pub fn store(&self) -> &KeyValueStoreRef {
        &self.store
    }

    pub fn navigator(&self) -> &NavigatorRef {
        &self.navigator
    }

    pub fn login_view(&self) -> &str {
        &self.login_view
    }

    /// Every path resolves against the base URL, so the token never leaves the API host
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue a request and decode the JSON response body
    pub async fn request<B>(&self, path: &str, method: Method, body: Option<&B>) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let token = self.store.get(TOKEN_KEY).await?;

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!(%method, %url, authenticated = token.is_some(), "Sending request");

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(%method, %url, "Unauthorized response, ending session");
            if let Err(e) = self.clear_session().await {
                warn!("Failed to clear session after unauthorized response: {}", e);
            }
            self.navigator.redirect(&self.login_view);
            return Err(ClientError::Unauthorized);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::RequestError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = failure_message(&text);
            warn!(%method, %url, status = status.as_u16(), %message, "Request failed");
            return Err(ClientError::RequestFailed {
                status_code: status.as_u16(),
                message,
            });
        }

        info!(%method, %url, status = status.as_u16(), "Request succeeded");

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| ClientError::ParsingError(format!("Failed to parse response: {}", e)))
    }

    pub async fn get(&self, path: &str) -> ClientResult<Value> {
        self.request::<()>(path, Method::GET, None).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.request(path, Method::POST, Some(body)).await
    }

    pub async fn patch<B>(&self, path: &str, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.request(path, Method::PATCH, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<Value> {
        self.request::<()>(path, Method::DELETE, None).await
    }

    /// Remove every session key. All keys are attempted; the first failure is returned.
    pub(crate) async fn clear_session(&self) -> ClientResult<()> {
        let mut first_error = None;
        for key in SESSION_KEYS {
            if let Err(e) = self.store.remove(key).await {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

/// Pick the user-facing message out of a failed response body.
///
/// `error` wins over `detail`. A `detail` list (request validation failures)
/// is flattened into its `msg` entries.
fn failure_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return GENERIC_FAILURE_MESSAGE.to_string();
    };

    if let Some(message) = value.get("error").and_then(message_text) {
        return message;
    }
    if let Some(message) = value.get("detail").and_then(message_text) {
        return message;
    }
    GENERIC_FAILURE_MESSAGE.to_string()
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        Value::Object(map) => map.get("message").and_then(message_text),
        _ => None,
    }
}
