//! Store configuration.

use crate::error::{StoreError, StoreResult};

/// Configuration for a [`CollectionStore`](crate::CollectionStore).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Prefix prepended to each collection name to form its persisted key.
    pub key_prefix: String,
    /// Seed fixture data into collections that have no snapshot yet.
    pub seed_on_empty: bool,
    /// Per-subscriber buffer of the change feed.
    pub feed_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key_prefix: "closet_craze_".to_string(),
            seed_on_empty: true,
            feed_capacity: 256,
        }
    }
}

impl StoreConfig {
    const MAX_PREFIX_LEN: usize = 64;

    /// Default configuration without fixture seeding.
    #[must_use]
    pub fn unseeded() -> Self {
        Self {
            seed_on_empty: false,
            ..Self::default()
        }
    }

    /// Check the configuration, returning it unchanged when valid.
    pub fn validate(self) -> StoreResult<Self> {
        if self.key_prefix.len() > Self::MAX_PREFIX_LEN {
            return Err(StoreError::InvalidConfig(format!(
                "key_prefix must be at most {} bytes (got {})",
                Self::MAX_PREFIX_LEN,
                self.key_prefix.len()
            )));
        }
        if !self
            .key_prefix
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
        {
            return Err(StoreError::InvalidConfig(format!(
                "key_prefix '{}' may only contain ASCII letters, digits, '_', '-' and '.'",
                self.key_prefix
            )));
        }
        if self.key_prefix.starts_with('.') {
            return Err(StoreError::InvalidConfig(
                "key_prefix must not start with '.'".to_string(),
            ));
        }
        if self.feed_capacity == 0 {
            return Err(StoreError::InvalidConfig(
                "feed_capacity must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}
