//! Shopping cart with a tier-dependent hold timer, and checkout into an order.
//!
//! Like the vault, the cart is view state. Checkout produces an [`Order`]
//! whose line items are copies of the products as they were when added; the
//! caller records it with [`CollectionStore::record_purchase`](crate::CollectionStore::record_purchase).

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::CartError;
use crate::model::{Bundle, LineItem, Order, OrderStatus, OrderType, Product, ProductStatus, UserStatus};
use crate::tier::points_for_purchase;

/// Reservation window started when the first item enters the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTimer {
    started_at: DateTime<Utc>,
    hold: Duration,
}

impl CartTimer {
    /// Start a window of `hold` at `now`.
    #[must_use]
    pub fn start(now: DateTime<Utc>, hold: Duration) -> Self {
        Self {
            started_at: now,
            hold,
        }
    }

    /// When the hold began.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the hold ends.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.started_at + self.hold
    }

    /// Time left at `now`, clamped at zero.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at() - now).max(Duration::zero())
    }

    /// Whether the hold has ended at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

/// A customer's cart.
#[derive(Debug, Clone)]
pub struct Cart {
    tier: UserStatus,
    items: Vec<LineItem>,
    timer: Option<CartTimer>,
}

impl Cart {
    /// Empty cart for a customer at `tier`.
    #[must_use]
    pub fn new(tier: UserStatus) -> Self {
        Self {
            tier,
            items: Vec::new(),
            timer: None,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        if self.timer.is_none() {
            self.timer = Some(CartTimer::start(now, self.tier.cart_hold()));
        }
    }

    /// Add a copy of `product`.
    ///
    /// # Errors
    /// - `Unavailable` if the listing is archived or restricted
    /// - `SoldOut` if no stock remains and it is not a pre-order
    pub fn add_product(&mut self, product: &Product, now: DateTime<Utc>) -> Result<(), CartError> {
        if product.effective_status() != ProductStatus::Deployed {
            return Err(CartError::Unavailable {
                id: product.id.clone(),
            });
        }
        if product.scarcity_count <= 0 && !product.is_pre_order() {
            return Err(CartError::SoldOut {
                id: product.id.clone(),
            });
        }
        self.touch(now);
        self.items.push(LineItem::Product(product.clone()));
        Ok(())
    }

    /// Add a copy of `bundle`.
    pub fn add_bundle(&mut self, bundle: &Bundle, now: DateTime<Utc>) {
        self.touch(now);
        self.items.push(LineItem::Bundle(bundle.clone()));
    }

    /// Remove the first line with `id`. Emptying the cart stops the timer.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(idx) = self.items.iter().position(|item| item.id() == id) else {
            return false;
        };
        self.items.remove(idx);
        if self.items.is_empty() {
            self.timer = None;
        }
        true
    }

    /// Lines in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The running hold, if any item has been added.
    #[must_use]
    pub fn timer(&self) -> Option<&CartTimer> {
        self.timer.as_ref()
    }

    /// Sum of line prices.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::price).sum()
    }

    fn order_type(&self) -> OrderType {
        let pre_order = self
            .items
            .iter()
            .any(|item| matches!(item, LineItem::Product(p) if p.is_pre_order()));
        if pre_order {
            OrderType::PreOrder
        } else if self.items.iter().any(|item| matches!(item, LineItem::Bundle(_))) {
            OrderType::Bundle
        } else {
            OrderType::Standard
        }
    }

    /// Turn the cart into a `Processing` order and empty it.
    ///
    /// # Errors
    /// - `Empty` if there is nothing to buy
    /// - `Expired` if the hold ran out; the cart is cleared
    pub fn checkout(&mut self, now: DateTime<Utc>) -> Result<Order, CartError> {
        if self.items.is_empty() {
            return Err(CartError::Empty);
        }
        if let Some(timer) = self.timer.filter(|t| t.is_expired(now)) {
            self.items.clear();
            self.timer = None;
            return Err(CartError::Expired {
                expired_at: timer.expires_at().to_rfc3339(),
            });
        }

        let total = self.total();
        let order = Order {
            id: format!("ord-{}", Uuid::new_v4()),
            date: now.format("%b %-d, %Y").to_string(),
            order_type: self.order_type(),
            items: std::mem::take(&mut self.items),
            total,
            status: OrderStatus::Processing,
            points_earned: points_for_purchase(total, self.tier),
        };
        self.timer = None;
        Ok(order)
    }
}
