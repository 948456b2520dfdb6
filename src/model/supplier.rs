//! Supplier directory.

use serde::{Deserialize, Serialize};

use crate::collection::{Collection, Record};

/// Operational status of a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplierStatus {
    /// Cleared to list products.
    Operational,
    /// Listings suspended.
    Restricted,
    /// Awaiting review.
    #[default]
    Pending,
}

/// A supplier that can list products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// Unique id.
    pub id: String,
    /// Trading name.
    pub name: String,
    /// Where the supplier operates.
    pub region: String,
    /// What the supplier makes.
    pub specialty: String,
    /// Review status.
    pub status: SupplierStatus,
    /// 0–100, higher is more reliable.
    pub resilience_score: u32,
    /// Number of live listings.
    pub active_assets: u32,
    /// Date onboarded, `YYYY-MM-DD`.
    pub onboarded_date: String,
}

impl Record for Supplier {
    const COLLECTION: Collection = Collection::Suppliers;

    fn id(&self) -> &str {
        &self.id
    }
}
