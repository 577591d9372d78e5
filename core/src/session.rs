//! Login, registration and logout on top of the API client.
//!
//! A session is three stored values: the bearer token, the user profile and
//! the current organization. They are written together after a successful
//! login or registration and removed together on logout or when the server
//! answers 401.

use serde_json::Value;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::errors::ClientResult;
use crate::types::{
    AuthData, AuthSession, LoginRequest, RegisterRequest, CURRENT_USER_PATH, LOGIN_PATH,
    ORGANIZATION_KEY, REGISTER_PATH, TOKEN_KEY, USER_KEY,
};

/// Manages the stored session for an `ApiClient`
#[derive(Debug, Clone)]
pub struct SessionManager {
    client: ApiClient,
}

impl SessionManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Log in with email and password, storing the session on success
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthSession> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.client.post(LOGIN_PATH, &request).await?;
        self.establish(response).await
    }

    /// Register a user and organization, storing the session on success
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthSession> {
        let response = self.client.post(REGISTER_PATH, request).await?;
        self.establish(response).await
    }

    /// The response is fully validated before anything is written, so a
    /// malformed response leaves the previous session in place.
    async fn establish(&self, response: Value) -> ClientResult<AuthSession> {
        let (token, session) = AuthData::from_response(response)?;

        let store = self.client.store();
        store.set(TOKEN_KEY, token).await?;
        store.set_json(USER_KEY, &session.user).await?;
        store
            .set_json(ORGANIZATION_KEY, &session.current_organization)
            .await?;

        info!("Session established");
        Ok(session)
    }

    /// Drop the stored session and send the user to the login view
    pub async fn logout(&self) -> ClientResult<()> {
        let cleared = self.client.clear_session().await;
        info!("Session cleared");
        self.client.navigator().redirect(self.client.login_view());
        cleared
    }

    /// Stored bearer token, if any
    pub async fn token(&self) -> ClientResult<Option<String>> {
        Ok(self.client.store().get(TOKEN_KEY).await?)
    }

    /// True when a token is stored. A store that cannot be read counts as logged out.
    pub async fn is_logged_in(&self) -> bool {
        match self.token().await {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!("Failed to read session token: {}", e);
                false
            }
        }
    }

    /// Redirect to the login view when logged out. Returns whether a session exists.
    pub async fn require_auth(&self) -> bool {
        let logged_in = self.is_logged_in().await;
        if !logged_in {
            self.client.navigator().redirect(self.client.login_view());
        }
        logged_in
    }

    /// Stored user profile
    pub async fn current_user(&self) -> Option<Value> {
        self.stored_json(USER_KEY).await
    }

    /// Stored current organization
    pub async fn current_organization(&self) -> Option<Value> {
        self.stored_json(ORGANIZATION_KEY).await
    }

    async fn stored_json(&self, key: &str) -> Option<Value> {
        match self.client.store().get_json(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring unreadable stored {}: {}", key, e);
                None
            }
        }
    }

    /// Ask the server who the stored token belongs to
    pub async fn fetch_current_user(&self) -> ClientResult<Value> {
        self.client.get(CURRENT_USER_PATH).await
    }
}
