use std::error::Error;
use std::fmt::{Debug, Display};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

/// Error type for key-value store operations
#[derive(Debug)]
pub enum StoreError {
    /// The backing medium could not be read or written
    StorageError(String),
    /// A stored value could not be encoded or decoded
    SerializationError(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            StoreError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for StoreError {}

/// Trait defining the interface for session value stores
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    /// Get the raw value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Get the value under `key` decoded as JSON
    async fn get_json(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match self.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::SerializationError(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    /// Store `value` under `key` as JSON text
    async fn set_json(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| StoreError::SerializationError(format!("{}: {}", key, e)))?;
        self.set(key, raw).await
    }
}

/// Type alias for Arc-wrapped KeyValueStore trait objects
pub type KeyValueStoreRef = Arc<dyn KeyValueStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn json_values_are_stored_as_text() {
        let store = InMemoryStore::new();
        store.set_json("user", &json!({"id": 1})).await.unwrap();

        assert_eq!(store.get("user").await.unwrap(), Some(r#"{"id":1}"#.to_string()));
        assert_eq!(store.get_json("user").await.unwrap(), Some(json!({"id": 1})));
    }

    #[tokio::test]
    async fn undecodable_value_is_a_serialization_error() {
        let store = InMemoryStore::new();
        store.set("user", "not json".to_string()).await.unwrap();

        let result = store.get_json("user").await;
        assert!(matches!(result, Err(StoreError::SerializationError(_))));
    }

    #[tokio::test]
    async fn missing_json_key_reads_as_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.get_json("organization").await.unwrap(), None);
    }
}
