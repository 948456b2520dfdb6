//! Orders and their line-item snapshots.

use serde::{Deserialize, Serialize};

use crate::collection::{ensure_finite, Collection, Record};
use crate::error::StoreResult;

use super::product::Product;

/// A curated set of products sold at a single price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Products included, as they were when bundled.
    pub products: Vec<Product>,
    /// Bundle price.
    pub price: f64,
    /// Price before the bundle discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
}

/// One purchased item: a copy of the product or bundle as it was at checkout.
///
/// Line items are snapshots. Editing the catalog later never changes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineItem {
    /// A bundle (tried first: it is the only shape with `products`).
    Bundle(Bundle),
    /// A single product.
    Product(Product),
}

impl LineItem {
    /// Id of the product or bundle.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Bundle(b) => &b.id,
            Self::Product(p) => &p.id,
        }
    }

    /// Price charged for this line.
    #[must_use]
    pub fn price(&self) -> f64 {
        match self {
            Self::Bundle(b) => b.price,
            Self::Product(p) => p.checkout_price(),
        }
    }
}

/// Fulfilment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Paid, not yet shipped.
    #[default]
    Processing,
    /// Shipped.
    Deployed,
    /// Delivered.
    Received,
    /// Closed out.
    Archived,
}

/// How the order was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderType {
    /// In-stock items only.
    #[default]
    Standard,
    /// Contains at least one pre-order item.
    PreOrder,
    /// Contains at least one bundle.
    Bundle,
}

/// A checked-out order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique id.
    pub id: String,
    /// Display date, e.g. `Oct 16, 2026`.
    pub date: String,
    /// Purchased lines, copied at checkout.
    pub items: Vec<LineItem>,
    /// Amount charged.
    pub total: f64,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// How the order was placed.
    pub order_type: OrderType,
    /// Loyalty points credited for this order.
    pub points_earned: u64,
}

impl Bundle {
    fn validate(&self) -> StoreResult<()> {
        ensure_finite("bundle.price", self.price)?;
        if let Some(original) = self.original_price {
            ensure_finite("bundle.originalPrice", original)?;
        }
        self.products.iter().try_for_each(Product::validate)
    }
}

impl Record for Order {
    const COLLECTION: Collection = Collection::Orders;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> StoreResult<()> {
        ensure_finite("total", self.total)?;
        self.items.iter().try_for_each(|item| match item {
            LineItem::Bundle(b) => b.validate(),
            LineItem::Product(p) => p.validate(),
        })
    }
}
