//! Error types for the collection store.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! specific conditions. Not-found on update/delete is deliberately absent:
//! those calls report `Ok(false)` instead.

use thiserror::Error;

/// Errors raised by the store and its key-value substrate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key-value substrate rejected a read or write.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A record could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A persisted snapshot exists but cannot be decoded.
    #[error("Corrupt snapshot at '{key}': {message}")]
    CorruptSnapshot {
        /// Substrate key holding the snapshot.
        key: String,
        /// What went wrong while decoding.
        message: String,
    },

    /// A persisted snapshot was written by a newer schema.
    #[error("Snapshot at '{key}' has schema version {found}, this build supports up to {supported}")]
    UnsupportedSchemaVersion {
        /// Substrate key holding the snapshot.
        key: String,
        /// Version found in the envelope.
        found: u32,
        /// Highest version this build can read.
        supported: u32,
    },

    /// A collection lock was poisoned by a panicking writer.
    #[error("Poisoned lock: {0}")]
    LockPoisoned(&'static str),

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The requested collection name is not one of the six known collections.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// Filesystem error from the persistent backend or a download sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Creates a backend error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Returns true if the error comes from an unreadable persisted snapshot.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::CorruptSnapshot { .. } | Self::UnsupportedSchemaVersion { .. }
        )
    }

    /// Returns true if the error originates in the persistence medium.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Backend(_) | Self::Io(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors raised by the client-side vault (wishlist).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// Every slot allowed by the customer's tier is used.
    #[error("Vault is full ({capacity} slots)")]
    CapacityReached {
        /// Slot limit of the tier.
        capacity: usize,
    },

    /// The product is already saved.
    #[error("Product {id} is already in the vault")]
    AlreadyVaulted {
        /// Product id.
        id: String,
    },
}

/// Errors raised while building or checking out a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Checkout with no items.
    #[error("Cart is empty")]
    Empty,

    /// The hold window ran out before checkout.
    #[error("Cart hold expired at {expired_at}")]
    Expired {
        /// RFC 3339 time the hold ended.
        expired_at: String,
    },

    /// No stock left and the product is not a pre-order.
    #[error("Product {id} is sold out")]
    SoldOut {
        /// Product id.
        id: String,
    },

    /// The listing is archived or restricted.
    #[error("Product {id} is not available for purchase")]
    Unavailable {
        /// Product id.
        id: String,
    },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_snapshot_message() {
        let err = StoreError::CorruptSnapshot {
            key: "closet_craze_products".to_string(),
            message: "expected value".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("closet_craze_products"));
        assert!(msg.contains("expected value"));
        assert!(err.is_corruption());
        assert!(!err.is_persistence());
    }

    #[test]
    fn test_schema_version_message() {
        let err = StoreError::UnsupportedSchemaVersion {
            key: "orders".to_string(),
            found: 9,
            supported: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains('9'));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_io_error_is_persistence() {
        let err: StoreError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(err.is_persistence());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let err: StoreError = parse.into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_vault_and_cart_messages() {
        assert!(VaultError::CapacityReached { capacity: 3 }
            .to_string()
            .contains('3'));
        assert_eq!(CartError::Empty.to_string(), "Cart is empty");
    }
}
