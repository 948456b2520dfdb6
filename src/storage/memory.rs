//! In-memory key-value backend.
//!
//! Thread-safe and cheaply cloneable: clones share the same map, so a test can
//! drop a store and reopen a fresh one "against the same medium". An optional
//! byte quota mimics the storage limit of a browser origin.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::StoreError;
use crate::storage::traits::KeyValueStore;

fn lock_err(context: &'static str) -> StoreError {
    StoreError::LockPoisoned(context)
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryState {
    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

/// Shared in-memory key-value store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty, unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once keys plus values exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                entries: HashMap::new(),
                quota_bytes: Some(bytes),
            })),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> Result<usize, StoreError> {
        let state = self.state.read().map_err(|_| lock_err("memory.len"))?;
        Ok(state.entries.len())
    }

    /// True when no key has been written.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Sorted list of stored keys.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let state = self.state.read().map_err(|_| lock_err("memory.keys"))?;
        let mut keys: Vec<String> = state.entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let state = self.state.read().map_err(|_| lock_err("memory.get"))?;
        Ok(state.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| lock_err("memory.set"))?;
        if let Some(quota) = state.quota_bytes {
            let needed = state.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::backend(format!(
                    "quota exceeded writing '{key}': {needed} bytes > {quota} bytes"
                )));
            }
        }
        state.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| lock_err("memory.remove"))?;
        state.entries.remove(key);
        Ok(())
    }
}
