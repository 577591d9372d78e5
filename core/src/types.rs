use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ClientError, ClientResult};

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the user profile JSON
pub const USER_KEY: &str = "user";
/// Storage key holding the current organization JSON
pub const ORGANIZATION_KEY: &str = "organization";

/// Every key that makes up a session
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USER_KEY, ORGANIZATION_KEY];

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const CURRENT_USER_PATH: &str = "/auth/me";

/// Message used when an auth response carries no token
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

/// Credentials for `POST /auth/login`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload for `POST /auth/register`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub organization_name: String,
}

/// What a successful login or registration hands back to the caller
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuthSession {
    pub user: Value,
    pub current_organization: Value,
    #[serde(default)]
    pub organizations: Vec<Value>,
}

/// `data` member of the auth response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct AuthData {
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Value,
    #[serde(default)]
    pub current_organization: Value,
    #[serde(default)]
    pub organizations: Value,
}

#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    data: Option<AuthData>,
}

impl AuthData {
    /// Extract the auth data from a response body, requiring a non-empty token
    pub(crate) fn from_response(body: Value) -> ClientResult<(String, AuthSession)> {
        let envelope: AuthEnvelope = serde_json::from_value(body)
            .map_err(|_| ClientError::MalformedResponse(INVALID_RESPONSE_MESSAGE.to_string()))?;

        let data = envelope
            .data
            .ok_or_else(|| ClientError::MalformedResponse(INVALID_RESPONSE_MESSAGE.to_string()))?;

        let token = data
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::MalformedResponse(INVALID_RESPONSE_MESSAGE.to_string()))?;

        Ok((
            token,
            AuthSession {
                user: data.user,
                current_organization: data.current_organization,
                organizations: match data.organizations {
                    Value::Array(items) => items,
                    _ => Vec::new(),
                },
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_envelope_is_accepted() {
        let body = json!({
            "success": true,
            "data": {
                "access_token": "t1",
                "token_type": "bearer",
                "user": {"id": 1},
                "current_organization": {"id": 2},
                "organizations": [{"id": 2}]
            }
        });

        let (token, session) = AuthData::from_response(body).unwrap();
        assert_eq!(token, "t1");
        assert_eq!(session.user, json!({"id": 1}));
        assert_eq!(session.current_organization, json!({"id": 2}));
        assert_eq!(session.organizations, vec![json!({"id": 2})]);
    }

    #[test]
    fn missing_token_is_malformed() {
        for body in [
            json!({"data": {"user": {"id": 1}}}),
            json!({"data": {"access_token": ""}}),
            json!({"data": null}),
            json!({"token": "t1"}),
            json!("not an object"),
        ] {
            let result = AuthData::from_response(body);
            assert!(
                matches!(result, Err(ClientError::MalformedResponse(ref msg)) if msg == INVALID_RESPONSE_MESSAGE)
            );
        }
    }

    #[test]
    fn organizations_that_are_not_a_list_are_ignored() {
        for organizations in [json!(null), json!({"id": 2}), json!("org")] {
            let body = json!({
                "data": {
                    "access_token": "t1",
                    "user": {"id": 1},
                    "current_organization": {"id": 2},
                    "organizations": organizations
                }
            });

            let (token, session) = AuthData::from_response(body).unwrap();
            assert_eq!(token, "t1");
            assert!(session.organizations.is_empty());
        }
    }

    #[test]
    fn register_request_uses_snake_case_fields() {
        let request = RegisterRequest {
            email: "a@b.co".to_string(),
            password: "secret123".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            organization_name: "Engines Ltd".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["first_name"], "Ada");
        assert_eq!(value["organization_name"], "Engines Ltd");
    }
}
