//! Status tier rules.
//!
//! Tiers are derived from loyalty points and drive three perks: the points
//! multiplier on purchases, vault (wishlist) capacity, and how long a cart
//! holds its items.

use chrono::Duration;

use crate::model::UserStatus;

/// Points needed to reach each tier, lowest first.
pub const TIER_THRESHOLDS: [(UserStatus, u64); 4] = [
    (UserStatus::Observer, 0),
    (UserStatus::Insider, 1_000),
    (UserStatus::Trendsetter, 5_000),
    (UserStatus::Icon, 15_000),
];

/// One point per this many currency units spent, before the tier multiplier.
pub const SPEND_PER_POINT: f64 = 10.0;

impl UserStatus {
    /// Tier earned by `points`.
    #[must_use]
    pub fn for_points(points: u64) -> Self {
        TIER_THRESHOLDS
            .iter()
            .rev()
            .find(|(_, min)| points >= *min)
            .map_or(Self::Observer, |(tier, _)| *tier)
    }

    /// Points at which this tier starts.
    #[must_use]
    pub fn threshold(self) -> u64 {
        TIER_THRESHOLDS
            .iter()
            .find(|(tier, _)| *tier == self)
            .map_or(0, |(_, min)| *min)
    }

    /// The tier above this one, if any.
    #[must_use]
    pub const fn next_tier(self) -> Option<Self> {
        match self {
            Self::Observer => Some(Self::Insider),
            Self::Insider => Some(Self::Trendsetter),
            Self::Trendsetter => Some(Self::Icon),
            Self::Icon => None,
        }
    }

    /// Points still missing to reach the next tier from `points`.
    #[must_use]
    pub fn points_to_next_tier(points: u64) -> Option<u64> {
        Self::for_points(points)
            .next_tier()
            .map(|next| next.threshold().saturating_sub(points))
    }

    /// Multiplier applied to points earned on a purchase.
    #[must_use]
    pub const fn points_multiplier(self) -> f64 {
        match self {
            Self::Observer => 1.0,
            Self::Insider => 1.25,
            Self::Trendsetter => 1.5,
            Self::Icon => 2.0,
        }
    }

    /// Vault slots, `None` for unlimited.
    #[must_use]
    pub const fn vault_capacity(self) -> Option<usize> {
        match self {
            Self::Observer => Some(3),
            Self::Insider => Some(10),
            Self::Trendsetter => Some(25),
            Self::Icon => None,
        }
    }

    /// How long a cart reserves its items.
    #[must_use]
    pub fn cart_hold(self) -> Duration {
        Duration::minutes(match self {
            Self::Observer => 10,
            Self::Insider => 15,
            Self::Trendsetter => 20,
            Self::Icon => 30,
        })
    }
}

/// Points earned for spending `total` at tier `status`.
#[must_use]
pub fn points_for_purchase(total: f64, status: UserStatus) -> u64 {
    if !total.is_finite() || total <= 0.0 {
        return 0;
    }
    let points = (total / SPEND_PER_POINT * status.points_multiplier()).floor();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        points as u64
    }
}
