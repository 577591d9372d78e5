use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::debug;

use crate::storage::store::{KeyValueStore, StoreError};

/// In-memory implementation of KeyValueStore
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    /// Thread-safe storage of values
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Create a new, empty InMemoryStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.values.read().map(|values| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.read().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut values = self.values.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        values.insert(key.to_string(), value);
        debug!("Stored key: {}", key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        if values.remove(key).is_some() {
            debug!("Removed key: {}", key);
        }
        Ok(())
    }
}
