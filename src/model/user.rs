//! Customer accounts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::collection::{Collection, Record};

/// Status tier of a customer. Ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum UserStatus {
    /// Entry tier, from 0 points.
    #[default]
    Observer,
    /// From 1,000 points.
    Insider,
    /// From 5,000 points.
    Trendsetter,
    /// From 15,000 points.
    Icon,
}

impl UserStatus {
    /// All tiers, lowest first.
    pub const ALL: [Self; 4] = [Self::Observer, Self::Insider, Self::Trendsetter, Self::Icon];

    /// Wire token, identical to the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Observer => "Observer",
            Self::Insider => "Insider",
            Self::Trendsetter => "Trendsetter",
            Self::Icon => "Icon",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Unique id.
    pub id: String,
    /// Public handle.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Current tier.
    pub status: UserStatus,
    /// Loyalty point balance.
    pub points: u64,
    /// Premium currency balance.
    pub diamonds: u64,
    /// Sign-up date, `YYYY-MM-DD`.
    pub joined_date: String,
    /// Last activity date, `YYYY-MM-DD`.
    pub last_active: String,
}

impl Record for UserAccount {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> &str {
        &self.id
    }
}
