use anyhow::{anyhow, bail, Context, Result};
use finwall_core::config::{get_default_config_file, get_default_session_file};
use finwall_core::{
    ApiClient, ClientConfig, FileStore, Method, RegisterRequest, SessionManager,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::cli::{Args, Command};
use crate::navigator::ConsoleNavigator;
use crate::output::{print_json, print_session_started, print_status};

const APP_NAME: &str = "finwall";

/// Build the effective config: file, then environment, then command-line flags
pub fn resolve_config(args: &Args) -> Result<ClientConfig> {
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_default_config_file(APP_NAME)?,
    };
    let from_file = ClientConfig::load_from_file(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let from_args = ClientConfig {
        api_base_url: args.api_url.clone(),
        login_view: None,
        request_timeout_secs: None,
        session_file: args.session_file.clone(),
        log_level: None,
    };

    Ok(from_file.apply_env().merge(&from_args))
}

fn open_session(config: &ClientConfig) -> Result<SessionManager> {
    let session_path = match &config.session_file {
        Some(path) => path.clone(),
        None => get_default_session_file(APP_NAME)?,
    };
    debug!("Using session file {}", session_path.display());

    let store = FileStore::open(&session_path)
        .with_context(|| format!("Failed to open session file {}", session_path.display()))?;
    let client = ApiClient::new(config, Arc::new(store), Arc::new(ConsoleNavigator))?;
    Ok(SessionManager::new(client))
}

/// Execute the selected subcommand
pub async fn run(args: Args, config: ClientConfig) -> Result<()> {
    let session = open_session(&config)?;

    match args.command {
        Command::Login { email, password } => {
            let started = session.login(&email, &password).await?;
            print_session_started(&started);
        }
        Command::Register {
            email,
            password,
            first_name,
            last_name,
            organization,
        } => {
            let request = RegisterRequest {
                email,
                password,
                first_name,
                last_name,
                organization_name: organization,
            };
            let started = session.register(&request).await?;
            print_session_started(&started);
        }
        Command::Logout => {
            session.logout().await?;
        }
        Command::Status => {
            let user = session.current_user().await;
            let organization = session.current_organization().await;
            print_status(
                session.is_logged_in().await,
                user.as_ref(),
                organization.as_ref(),
            );
        }
        Command::Me => {
            ensure_logged_in(&session).await?;
            print_json(&session.fetch_current_user().await?);
        }
        Command::Request { method, path, data } => {
            let method = parse_method(&method)?;
            let body = parse_body(data.as_deref())?;
            ensure_logged_in(&session).await?;
            let response = session
                .client()
                .request(&path, method, body.as_ref())
                .await?;
            print_json(&response);
        }
    }

    Ok(())
}

/// Commands that need a session fail once the login hint has been shown
async fn ensure_logged_in(session: &SessionManager) -> Result<()> {
    if !session.require_auth().await {
        bail!("Not logged in");
    }
    Ok(())
}

/// Accept the verbs the API client exposes, case-insensitively
pub fn parse_method(method: &str) -> Result<Method> {
    match method.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        other => bail!("Unsupported method {}: expected GET, POST, PATCH or DELETE", other),
    }
}

pub fn parse_body(data: Option<&str>) -> Result<Option<Value>> {
    data.map(|raw| {
        serde_json::from_str(raw).map_err(|e| anyhow!("--data is not valid JSON: {}", e))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn methods_are_case_insensitive() {
        assert_eq!(parse_method("get").unwrap(), Method::GET);
        assert_eq!(parse_method("Patch").unwrap(), Method::PATCH);
        assert_eq!(parse_method("DELETE").unwrap(), Method::DELETE);
        assert!(parse_method("PUT").is_err());
    }

    #[test]
    fn body_must_be_json() {
        assert_eq!(parse_body(None).unwrap(), None);
        assert_eq!(
            parse_body(Some(r#"{"name":"Widget"}"#)).unwrap(),
            Some(json!({"name": "Widget"}))
        );
        assert!(parse_body(Some("name=Widget")).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "api_base_url = \"http://from-file/api/v1\"\nlogin_view = \"/signin\"\n",
        )
        .unwrap();
        let session_path = dir.path().join("session.json");

        let args = Args::parse_from([
            "finwall",
            "--config",
            config_path.to_str().unwrap(),
            "--api-url",
            "http://from-flag/api/v1",
            "--session-file",
            session_path.to_str().unwrap(),
            "status",
        ]);
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.api_base_url(), "http://from-flag/api/v1");
        assert_eq!(config.login_view(), "/signin");
        assert_eq!(config.session_file, Some(session_path));
    }

    #[tokio::test]
    async fn authenticated_commands_fail_without_session() {
        let dir = tempdir().unwrap();
        let config = ClientConfig {
            // Nothing listens here; the command must stop before any request
            api_base_url: Some("http://127.0.0.1:9/api/v1".to_string()),
            session_file: Some(dir.path().join("session.json")),
            ..ClientConfig::default()
        };

        for argv in [
            vec!["finwall", "me"],
            vec!["finwall", "request", "GET", "/customers"],
        ] {
            let args = Args::parse_from(argv);
            let err = run(args, config.clone()).await.unwrap_err();
            assert_eq!(err.to_string(), "Not logged in");
        }
    }

    #[tokio::test]
    async fn logout_without_session_succeeds() {
        let dir = tempdir().unwrap();
        let config = ClientConfig {
            session_file: Some(dir.path().join("session.json")),
            ..ClientConfig::default()
        };

        run(Args::parse_from(["finwall", "logout"]), config).await.unwrap();
    }

    #[test]
    fn request_subcommand_parses() {
        let args = Args::parse_from([
            "finwall", "request", "post", "/items", "--data", r#"{"name":"Widget"}"#,
        ]);
        match args.command {
            Command::Request { method, path, data } => {
                assert_eq!(method, "post");
                assert_eq!(path, "/items");
                assert_eq!(data.as_deref(), Some(r#"{"name":"Widget"}"#));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
