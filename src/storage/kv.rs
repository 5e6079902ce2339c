//! Typed key-value store
//!
//! Values are stored as JSON text. Reads never fail: missing keys and text
//! that no longer parses both yield the caller's fallback.

use std::sync::Arc;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use crate::utils::errors::Result;
use crate::utils::logging::log_storage_operation;
use super::backend::{MemoryBackend, StorageBackend};

#[derive(Clone)]
pub struct KeyValueStore {
    backend: Arc<dyn StorageBackend>,
}

impl KeyValueStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by process memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Parsed value for `key`, or `fallback` when absent or unparseable
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        self.get_opt(key).unwrap_or(fallback)
    }

    /// Parsed value for `key`; parse failures are logged and read as absent
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get_raw(key).filter(|raw| !raw.is_empty())?;

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                debug!(key = %key, bytes = raw.len(), "Value read from storage");
                Some(value)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Stored value failed to parse, using fallback");
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let serialized = serde_json::to_string(value)?;
        let bytes = serialized.len();
        let result = self.backend.set_raw(key, serialized);
        log_storage_operation("set", key, bytes, result.is_ok());
        result
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let removed = self.backend.remove(key)?;
        debug!(key = %key, removed = removed, "Key removed from storage");
        Ok(())
    }

    /// Raw text for keys the browser stored unquoted
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.backend.get_raw(key).filter(|raw| !raw.is_empty())
    }

    pub fn set_string(&self, key: &str, value: &str) -> Result<()> {
        let result = self.backend.set_raw(key, value.to_string());
        log_storage_operation("set", key, value.len(), result.is_ok());
        result
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get_string(key).is_some()
    }

    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.backend
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect()
    }
}

impl std::fmt::Debug for KeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueStore")
            .field("keys", &self.backend.keys().len())
            .finish_non_exhaustive()
    }
}
