//! # closet-store - write-through collection store for Closet Craze
//!
//! The storefront and its admin/supplier back office keep all durable state
//! in six collections: products, orders, requests, notifications, suppliers
//! and users. This crate owns those collections.
//!
//! ## Core Concepts
//!
//! - **CollectionStore**: one object holding all six collections in memory,
//!   mirrored to a key-value medium on every mutation
//! - **KeyValueStore**: the medium (`get`/`set` on string keys); in-memory or,
//!   with the `persistent` feature, checksummed files in a locked directory
//! - **Snapshot envelope**: each collection is persisted as versioned JSON
//! - **Export**: CSV and SQL renderings of any collection, handed to a
//!   `DownloadSink`
//! - **Tiers**: loyalty status derived from points, driving vault capacity,
//!   cart hold time and the purchase points multiplier
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use closet_store::{CollectionStore, InMemoryKeyValueStore, Product, StoreConfig};
//!
//! let store = CollectionStore::open(Arc::new(InMemoryKeyValueStore::new()), StoreConfig::unseeded())?;
//! store.add_product(Product::new("p1", "Coat", 500.0))?;
//! assert_eq!(store.get_all_products()[0].status, Some(ProductStatus::Deployed));
//! let csv = store.generate_csv(Collection::Products)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Records and collections
pub mod collection;
pub mod error;
pub mod model;

// Persistence
pub mod config;
pub mod snapshot;
pub mod storage;
pub mod store;

// Derived state and reporting
pub mod cart;
pub mod export;
pub mod feed;
pub mod seed;
pub mod tier;
pub mod vault;

// Re-export primary types at crate root for convenience
pub use cart::{Cart, CartTimer};
pub use collection::{Collection, Placement, Record};
pub use config::StoreConfig;
pub use error::{CartError, StoreError, StoreResult, VaultError};
pub use export::{DirectorySink, DownloadSink, ExportFormat, MemorySink};
pub use feed::{ChangeFeed, ChangeKind, StoreEvent};
pub use model::{
    AppNotification, Bundle, Category, EmotionTag, EngagementRequest, LineItem, Mood,
    NotificationType, Order, OrderStatus, OrderType, Product, ProductOrigin, ProductStatus,
    RequestPriority, RequestStatus, RequestType, StyleTag, Supplier, SupplierStatus, TierTarget,
    UserAccount, UserStatus,
};
pub use storage::{InMemoryKeyValueStore, KeyValueStore};
pub use store::CollectionStore;
pub use tier::points_for_purchase;
pub use vault::Vault;
