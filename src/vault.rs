//! The vault: a customer's wishlist.
//!
//! Vault membership is client-side view state. The collection store never
//! persists it; only the capacity rule comes from the user's tier.

use crate::error::VaultError;
use crate::model::UserStatus;

/// Product ids saved by one customer, in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    tier: UserStatus,
    product_ids: Vec<String>,
}

impl Vault {
    /// Empty vault sized for `tier`.
    #[must_use]
    pub fn new(tier: UserStatus) -> Self {
        Self {
            tier,
            product_ids: Vec::new(),
        }
    }

    /// Slot limit, `None` for unlimited.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.tier.vault_capacity()
    }

    /// Free slots left, `None` for unlimited.
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        self.capacity()
            .map(|cap| cap.saturating_sub(self.product_ids.len()))
    }

    /// Save a product.
    ///
    /// # Errors
    /// - `AlreadyVaulted` if the product is already saved
    /// - `CapacityReached` if every slot is used
    pub fn add(&mut self, product_id: impl Into<String>) -> Result<(), VaultError> {
        let id = product_id.into();
        if self.contains(&id) {
            return Err(VaultError::AlreadyVaulted { id });
        }
        if let Some(capacity) = self.capacity() {
            if self.product_ids.len() >= capacity {
                return Err(VaultError::CapacityReached { capacity });
            }
        }
        self.product_ids.push(id);
        Ok(())
    }

    /// Remove a product. Returns whether it was saved.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.product_ids.len();
        self.product_ids.retain(|id| id != product_id);
        self.product_ids.len() != before
    }

    /// Whether `product_id` is saved.
    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.product_ids.iter().any(|id| id == product_id)
    }

    /// Saved ids, oldest first.
    #[must_use]
    pub fn product_ids(&self) -> &[String] {
        &self.product_ids
    }

    /// Number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.product_ids.len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }

    /// Change tier. A downgrade keeps existing items but blocks new ones
    /// until the vault is back under the new limit.
    pub fn set_tier(&mut self, tier: UserStatus) {
        self.tier = tier;
    }
}
