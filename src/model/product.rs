//! Catalog products.

use serde::{Deserialize, Serialize};

use crate::collection::{ensure_finite, Collection, Record};
use crate::error::StoreResult;

/// Visual mood a product is merchandised under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mood {
    /// Dark, sharp tailoring.
    Noir,
    /// Light, translucent fabrics.
    Ethereal,
    /// High-contrast, loud pieces.
    Electric,
    /// Raw textures and distressing.
    Feral,
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Coats and jackets.
    Outerwear,
    /// Shirts, knits and slips.
    Tops,
    /// Trousers and skirts.
    Bottoms,
    /// Shoes and boots.
    Footwear,
    /// Jewellery, bags and small goods.
    Accessories,
}

/// Style tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StyleTag {
    /// Experimental cuts.
    Avant,
    /// Clean, unadorned lines.
    Minimal,
    /// Streetwear.
    Street,
    /// Premium materials and finish.
    Luxe,
}

/// Emotion tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmotionTag {
    /// Bold.
    Confident,
    /// Guarded, intriguing.
    Mysterious,
    /// Against the grain.
    Rebellious,
    /// Calm.
    Serene,
}

/// Which back office created a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductOrigin {
    /// Created from the admin dashboard.
    Admin,
    /// Listed by a supplier.
    Supplier,
}

/// Lifecycle status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Live in the storefront.
    #[default]
    Deployed,
    /// Withdrawn, kept for history.
    Archived,
    /// Hidden pending review.
    Restricted,
}

/// A catalog product.
///
/// `scarcity_count` is remaining stock; it is expected to be non-negative but
/// the store does not enforce it. `status` is always `Some` once a product has
/// passed through `add_product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// One-line tagline.
    pub statement: String,
    /// List price.
    pub price: f64,
    /// Price before markdown, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Image URL.
    pub image: String,
    /// Merchandising mood.
    pub mood: Mood,
    /// Units in stock.
    pub scarcity_count: i64,
    /// Shoppers who saved or shared it.
    pub social_count: i64,
    /// Fit confidence, 0 to 100.
    pub fit_confidence: u32,
    /// Catalog category.
    pub category: Category,
    /// Style tag.
    pub style: StyleTag,
    /// Emotion tag.
    pub emotion: EmotionTag,
    /// Sold before stock arrives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pre_order: Option<bool>,
    /// Demand surge in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_surging: Option<bool>,
    /// Price while surging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surge_price: Option<f64>,
    /// Simulated demand shown during a surge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synthetic_demand: Option<u32>,
    /// Who listed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<ProductOrigin>,
    /// Listing supplier, for supplier-origin products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    /// Listing status; `DEPLOYED` once added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
}

impl Product {
    /// Creates an admin-side draft with neutral tags and no status.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            statement: String::new(),
            price,
            original_price: None,
            image: String::new(),
            mood: Mood::Noir,
            scarcity_count: 0,
            social_count: 0,
            fit_confidence: 0,
            category: Category::Outerwear,
            style: StyleTag::Minimal,
            emotion: EmotionTag::Confident,
            is_pre_order: None,
            is_surging: None,
            surge_price: None,
            synthetic_demand: None,
            origin: None,
            supplier_id: None,
            status: None,
        }
    }

    /// Effective status (`Deployed` when unset).
    #[must_use]
    pub fn effective_status(&self) -> ProductStatus {
        self.status.unwrap_or_default()
    }

    /// Price charged at checkout: the surge price while surging, else the list price.
    #[must_use]
    pub fn checkout_price(&self) -> f64 {
        match (self.is_surging, self.surge_price) {
            (Some(true), Some(surge)) => surge,
            _ => self.price,
        }
    }

    /// True when the product ships later instead of drawing down stock.
    #[must_use]
    pub fn is_pre_order(&self) -> bool {
        self.is_pre_order.unwrap_or(false)
    }
}

impl Record for Product {
    const COLLECTION: Collection = Collection::Products;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_defaults(&mut self) {
        if self.status.is_none() {
            self.status = Some(ProductStatus::Deployed);
        }
    }

    fn validate(&self) -> StoreResult<()> {
        ensure_finite("price", self.price)?;
        if let Some(original) = self.original_price {
            ensure_finite("originalPrice", original)?;
        }
        if let Some(surge) = self.surge_price {
            ensure_finite("surgePrice", surge)?;
        }
        Ok(())
    }
}
