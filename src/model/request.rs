//! Engagement requests raised by customers (bespoke) and suppliers (supply).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::{Collection, Record};

/// Kind of engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    /// Custom piece requested by a customer.
    Bespoke,
    /// Stock offer from a supplier.
    Supply,
}

/// Review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Approved.
    Authorized,
    /// Rejected and scheduled for removal.
    Purged,
    /// Held for a policy check.
    Flagged,
}

/// Triage priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestPriority {
    /// Whenever there is capacity.
    Low,
    /// Normal queue.
    #[default]
    Medium,
    /// Ahead of the normal queue.
    High,
    /// Handle immediately.
    Critical,
}

/// A bespoke or supply request awaiting review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRequest {
    /// Unique id.
    pub id: String,
    /// Bespoke commission or supply offer.
    #[serde(rename = "type")]
    pub kind: RequestType,
    /// Free-text handle of whoever raised the request.
    pub origin: String,
    /// Product the request refers to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// When the request was raised.
    pub timestamp: DateTime<Utc>,
    /// Review status.
    pub status: RequestStatus,
    /// Review priority.
    pub priority: RequestPriority,
    /// Free-text request body.
    pub details: String,
}

impl EngagementRequest {
    /// Creates a pending request stamped `timestamp`.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: RequestType,
        origin: impl Into<String>,
        details: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            origin: origin.into(),
            target: None,
            timestamp,
            status: RequestStatus::Pending,
            priority: RequestPriority::Medium,
            details: details.into(),
        }
    }
}

impl Record for EngagementRequest {
    const COLLECTION: Collection = Collection::Requests;

    fn id(&self) -> &str {
        &self.id
    }
}
