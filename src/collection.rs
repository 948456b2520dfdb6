//! Collection identities and the `Record` contract.
//!
//! Every record kind lives in exactly one named collection. The collection
//! decides the persisted key suffix and where new records are inserted.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// The six named collections owned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Catalog products.
    Products,
    /// Checked-out orders.
    Orders,
    /// Bespoke and supply engagement requests.
    Requests,
    /// In-app notifications.
    Notifications,
    /// Supplier directory.
    Suppliers,
    /// Customer accounts.
    Users,
}

/// Where `add` places a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Insert at the head (most recent first).
    Prepend,
    /// Insert at the tail (creation order).
    Append,
}

impl Collection {
    /// All collections, in load order.
    pub const ALL: [Self; 6] = [
        Self::Products,
        Self::Orders,
        Self::Requests,
        Self::Notifications,
        Self::Suppliers,
        Self::Users,
    ];

    /// Stable lowercase name, used as the persisted key suffix and SQL table name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Requests => "requests",
            Self::Notifications => "notifications",
            Self::Suppliers => "suppliers",
            Self::Users => "users",
        }
    }

    /// Insertion placement for new records.
    #[must_use]
    pub const fn placement(self) -> Placement {
        match self {
            Self::Orders | Self::Requests | Self::Notifications => Placement::Prepend,
            Self::Products | Self::Suppliers | Self::Users => Placement::Append,
        }
    }

    /// Persisted key for this collection under `prefix`.
    #[must_use]
    pub fn key(self, prefix: &str) -> String {
        format!("{prefix}{}", self.name())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| StoreError::UnknownCollection(s.to_string()))
    }
}

/// A record kind stored in one of the collections.
///
/// Implementations are plain serde structs; the store keeps them in an ordered
/// `Vec` and matches on `id()` with find-first semantics.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The collection this kind belongs to.
    const COLLECTION: Collection;

    /// Primary key within the collection.
    fn id(&self) -> &str;

    /// Fill kind-specific defaults on creation paths.
    fn apply_defaults(&mut self) {}

    /// Reject values the snapshot format cannot carry.
    ///
    /// JSON has no NaN or infinity; `serde_json` writes them as `null`, which
    /// would not decode on the next open.
    ///
    /// # Errors
    /// `Serialization` naming the offending field.
    fn validate(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Fails with `Serialization` unless `value` is finite.
pub(crate) fn ensure_finite(field: &str, value: f64) -> StoreResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StoreError::Serialization(format!(
            "{field} must be a finite number, got {value}"
        )))
    }
}
