//! Abstract key-value substrate.
//!
//! The contract mirrors browser local storage: synchronous, string keys,
//! string values, last write wins. Any medium that satisfies it can back a
//! `CollectionStore`.

use crate::error::StoreError;

/// Synchronous string key-value medium.
///
/// # Consistency
/// - `set` must be durable (for the medium's notion of durable) before it returns
/// - No cross-key atomicity is assumed
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
