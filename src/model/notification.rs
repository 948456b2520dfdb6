//! In-app notifications.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::collection::{Collection, Record};

use super::user::UserStatus;

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// General announcement.
    Info,
    /// Time-sensitive alert, such as a surging drop.
    Alert,
    /// Change to store rules or policies.
    Protocol,
    /// Change to the reader's account or tier.
    Status,
}

/// Audience of a notification: everyone, or a single tier.
///
/// Persisted as `"ALL"` or the tier token (`"Insider"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TierTarget {
    /// Broadcast to every tier.
    All,
    /// Only this tier.
    Tier(UserStatus),
}

impl TierTarget {
    /// Whether a user at `status` should see a notification with this target.
    #[must_use]
    pub fn includes(self, status: UserStatus) -> bool {
        match self {
            Self::All => true,
            Self::Tier(t) => t == status,
        }
    }
}

impl TryFrom<String> for TierTarget {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        UserStatus::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value))
            .map(Self::Tier)
            .ok_or_else(|| format!("unknown target tier: {value}"))
    }
}

impl From<TierTarget> for String {
    fn from(value: TierTarget) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TierTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Tier(t) => f.write_str(t.as_str()),
        }
    }
}

/// A notification shown in the storefront inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppNotification {
    /// Unique id.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Category of the notice.
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// When it was sent, as an RFC 3339 string.
    pub timestamp: String,
    /// Whether the reader has opened it.
    #[serde(default)]
    pub read: bool,
    /// Audience; `None` reaches every tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_tier: Option<TierTarget>,
}

impl AppNotification {
    /// Creates an unread broadcast notification.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: NotificationType,
        title: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            kind,
            timestamp: timestamp.into(),
            read: false,
            target_tier: None,
        }
    }

    /// Whether a user at `status` should see this notification.
    #[must_use]
    pub fn is_visible_to(&self, status: UserStatus) -> bool {
        self.target_tier.map_or(true, |t| t.includes(status))
    }
}

impl Record for AppNotification {
    const COLLECTION: Collection = Collection::Notifications;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_tier_tokens() {
        assert_eq!(serde_json::to_value(TierTarget::All).unwrap(), "ALL");
        assert_eq!(
            serde_json::to_value(TierTarget::Tier(UserStatus::Icon)).unwrap(),
            "Icon"
        );
        let parsed: TierTarget = serde_json::from_str("\"Trendsetter\"").unwrap();
        assert_eq!(parsed, TierTarget::Tier(UserStatus::Trendsetter));
        assert!(serde_json::from_str::<TierTarget>("\"Royalty\"").is_err());
    }

    #[test]
    fn test_read_defaults_to_false() {
        let raw = r#"{"id":"n1","title":"Drop","content":"x","type":"INFO","timestamp":"now"}"#;
        let n: AppNotification = serde_json::from_str(raw).unwrap();
        assert!(!n.read);
        assert!(n.is_visible_to(UserStatus::Observer));
    }

    #[test]
    fn test_visibility_by_tier() {
        let mut n = AppNotification::new("n1", NotificationType::Status, "Ascension", "", "now");
        n.target_tier = Some(TierTarget::Tier(UserStatus::Insider));
        assert!(n.is_visible_to(UserStatus::Insider));
        assert!(!n.is_visible_to(UserStatus::Icon));
        n.target_tier = Some(TierTarget::All);
        assert!(n.is_visible_to(UserStatus::Icon));
    }
}
