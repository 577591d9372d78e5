use crate::errors::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";
pub const DEFAULT_LOGIN_VIEW: &str = "login.html";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration for the FinWall client
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: Option<String>,
    pub login_view: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub session_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            login_view: Some(DEFAULT_LOGIN_VIEW.to_string()),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            session_file: None,
            log_level: Some("info".to_string()),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a file if it exists, otherwise returns the default config
    pub fn load_from_file(path: &Path) -> ClientResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                ClientError::ConfigError(format!("Failed to read config file: {}", e))
            })?;

            let config: Self = toml::from_str(&content).map_err(|e| {
                ClientError::ConfigError(format!("Failed to parse config file: {}", e))
            })?;

            Ok(Self::default().merge(&config))
        } else {
            Ok(Self::default())
        }
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            api_base_url: other
                .api_base_url
                .clone()
                .or_else(|| self.api_base_url.clone()),
            login_view: other.login_view.clone().or_else(|| self.login_view.clone()),
            request_timeout_secs: other.request_timeout_secs.or(self.request_timeout_secs),
            session_file: other
                .session_file
                .clone()
                .or_else(|| self.session_file.clone()),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
        }
    }

    /// Overrides values from `FINWALL_API_URL` and `FINWALL_LOG_LEVEL`
    pub fn apply_env(self) -> Self {
        let from_env = Self {
            api_base_url: std::env::var("FINWALL_API_URL").ok(),
            login_view: None,
            request_timeout_secs: None,
            session_file: None,
            log_level: std::env::var("FINWALL_LOG_LEVEL").ok(),
        };
        self.merge(&from_env)
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn login_view(&self) -> &str {
        self.login_view.as_deref().unwrap_or(DEFAULT_LOGIN_VIEW)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

/// Helper function to get default config directory
pub fn get_default_config_dir(app_name: &str) -> ClientResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        ClientError::ConfigError("Could not determine home directory".to_string())
    })?;

    Ok(home_dir.join(".config").join(app_name))
}

/// Helper function to get default config file path
pub fn get_default_config_file(app_name: &str) -> ClientResult<PathBuf> {
    let config_dir = get_default_config_dir(app_name)?;
    Ok(config_dir.join("config.toml"))
}

/// Helper function to get default session file path
pub fn get_default_session_file(app_name: &str) -> ClientResult<PathBuf> {
    let config_dir = get_default_config_dir(app_name)?;
    Ok(config_dir.join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = ClientConfig::load_from_file(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_keeps_defaults_for_unset_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_base_url = \"https://api.example.com/api/v1\"\n").unwrap();

        let config = ClientConfig::load_from_file(&path).unwrap();
        assert_eq!(config.api_base_url(), "https://api.example.com/api/v1");
        assert_eq!(config.login_view(), DEFAULT_LOGIN_VIEW);
    }

    #[test]
    fn full_file_overrides_every_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "api_base_url = \"https://api.example.com/api/v1\"\n\
             login_view = \"/signin\"\n\
             request_timeout_secs = 5\n\
             session_file = \"/tmp/finwall-session.json\"\n\
             log_level = \"debug\"\n",
        )
        .unwrap();

        let config = ClientConfig::load_from_file(&path).unwrap();
        assert_eq!(config.login_view(), "/signin");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.session_file,
            Some(PathBuf::from("/tmp/finwall-session.json"))
        );
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_base_url = [").unwrap();

        let result = ClientConfig::load_from_file(&path);
        assert!(matches!(result, Err(ClientError::ConfigError(_))));
    }

    #[test]
    fn merge_prefers_other_when_set() {
        let base = ClientConfig::default();
        let other = ClientConfig {
            api_base_url: Some("http://other".to_string()),
            login_view: None,
            request_timeout_secs: Some(5),
            session_file: None,
            log_level: None,
        };

        let merged = base.merge(&other);
        assert_eq!(merged.api_base_url(), "http://other");
        assert_eq!(merged.login_view(), DEFAULT_LOGIN_VIEW);
        assert_eq!(merged.request_timeout(), Duration::from_secs(5));
        assert_eq!(merged.log_level.as_deref(), Some("info"));
    }
}
