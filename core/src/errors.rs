use thiserror::Error;

use crate::storage::StoreError;

/// Errors surfaced by the FinWall client layer
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server rejected the stored credential. The session has already
    /// been cleared by the time this is returned.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{message}")]
    RequestFailed { status_code: u16, message: String },

    #[error("{0}")]
    MalformedResponse(String),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Request Error: {0}")]
    RequestError(String),

    #[error("Parsing Error: {0}")]
    ParsingError(String),

    #[error("Storage Error: {0}")]
    StorageError(String),
}

impl ClientError {
    /// Status code reported by the server, if this error came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::RequestFailed { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        ClientError::StorageError(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
