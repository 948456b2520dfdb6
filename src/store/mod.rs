//! The collection store.
//!
//! `CollectionStore` is the single source of truth for the six collections.
//! It is constructed explicitly against a [`KeyValueStore`] and shared by
//! reference (or `Arc`) wherever the storefront needs it.
//!
//! # Contract
//! - `get_all_*` returns a fresh copy; mutating it never affects the store
//! - `add_*` prepends orders, requests and notifications, appends the rest
//! - `update_*` replaces the first record with the same id; `Ok(false)` if none
//! - `delete_*` removes every record with the id; `Ok(false)` if none
//! - every successful mutation is persisted before it becomes visible
//!
//! Ids are supplied by callers and not checked for uniqueness: a duplicate id
//! coexists with the original and find-first semantics apply afterwards.
//!
//! Each collection has its own lock. Operations that touch two collections
//! (see [`CollectionStore::record_purchase`]) are not atomic across them.

mod table;

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use crate::collection::{Collection, Record};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::export::{self, DownloadSink, ExportFormat};
use crate::feed::{ChangeFeed, ChangeKind, FeedHub};
use crate::model::{
    AppNotification, EngagementRequest, LineItem, Order, OrderStatus, Product, RequestStatus,
    Supplier, SupplierStatus, UserAccount, UserStatus,
};
use crate::seed;
use crate::storage::{InMemoryKeyValueStore, KeyValueStore};

use table::Table;

/// Write-through store for products, orders, requests, notifications,
/// suppliers and users.
pub struct CollectionStore {
    backend: Arc<dyn KeyValueStore>,
    config: StoreConfig,
    products: Table<Product>,
    orders: Table<Order>,
    requests: Table<EngagementRequest>,
    notifications: Table<AppNotification>,
    suppliers: Table<Supplier>,
    users: Table<UserAccount>,
    feed: FeedHub,
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore")
            .field("config", &self.config)
            .field("products", &self.products.len())
            .field("orders", &self.orders.len())
            .field("requests", &self.requests.len())
            .field("notifications", &self.notifications.len())
            .field("suppliers", &self.suppliers.len())
            .field("users", &self.users.len())
            .finish_non_exhaustive()
    }
}

impl CollectionStore {
    /// Open the store, loading each collection from `backend` or seeding it.
    ///
    /// # Errors
    /// - `InvalidConfig` if `config` fails validation
    /// - `CorruptSnapshot` / `UnsupportedSchemaVersion` for unreadable snapshots
    /// - any backend error while reading or writing the initial snapshots
    pub fn open(backend: Arc<dyn KeyValueStore>, config: StoreConfig) -> StoreResult<Self> {
        let config = config.validate()?;
        let kv: &dyn KeyValueStore = backend.as_ref();
        let prefix = config.key_prefix.as_str();
        let seed_on_empty = config.seed_on_empty;

        let products = Table::load(kv, Collection::Products.key(prefix), seed_on_empty, seed::products)?;
        let orders = Table::load(kv, Collection::Orders.key(prefix), seed_on_empty, seed::orders)?;
        let requests = Table::load(kv, Collection::Requests.key(prefix), seed_on_empty, seed::requests)?;
        let notifications = Table::load(
            kv,
            Collection::Notifications.key(prefix),
            seed_on_empty,
            seed::notifications,
        )?;
        let suppliers = Table::load(kv, Collection::Suppliers.key(prefix), seed_on_empty, seed::suppliers)?;
        let users = Table::load(kv, Collection::Users.key(prefix), seed_on_empty, seed::users)?;

        let feed = FeedHub::new(config.feed_capacity);
        let store = Self {
            backend,
            config,
            products,
            orders,
            requests,
            notifications,
            suppliers,
            users,
            feed,
        };
        info!(?store, "collection store ready");
        Ok(store)
    }

    /// Seeded store over a fresh in-memory medium.
    pub fn in_memory() -> StoreResult<Self> {
        Self::open(Arc::new(InMemoryKeyValueStore::new()), StoreConfig::default())
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Persisted key of `collection`.
    #[must_use]
    pub fn key(&self, collection: Collection) -> &str {
        match collection {
            Collection::Products => self.products.key(),
            Collection::Orders => self.orders.key(),
            Collection::Requests => self.requests.key(),
            Collection::Notifications => self.notifications.key(),
            Collection::Suppliers => self.suppliers.key(),
            Collection::Users => self.users.key(),
        }
    }

    /// Number of records in `collection`.
    #[must_use]
    pub fn count(&self, collection: Collection) -> usize {
        match collection {
            Collection::Products => self.products.len(),
            Collection::Orders => self.orders.len(),
            Collection::Requests => self.requests.len(),
            Collection::Notifications => self.notifications.len(),
            Collection::Suppliers => self.suppliers.len(),
            Collection::Users => self.users.len(),
        }
    }

    /// Subscribe to committed mutations.
    #[must_use]
    pub fn subscribe(&self) -> ChangeFeed {
        self.feed.subscribe()
    }

    /// Events dropped because a subscriber's buffer was full.
    #[must_use]
    pub fn dropped_events(&self) -> u64 {
        self.feed.dropped_events()
    }

    // ---------------------------------------------------------------------
    // Generic write path
    // ---------------------------------------------------------------------

    fn add<T: Record>(&self, table: &Table<T>, record: T) -> StoreResult<()> {
        let id = record.id().to_string();
        table.insert(self.backend.as_ref(), record, || {
            self.committed(T::COLLECTION, ChangeKind::Added, &id);
        })
    }

    fn update<T: Record>(&self, table: &Table<T>, record: T) -> StoreResult<bool> {
        let id = record.id().to_string();
        let changed = table.replace(self.backend.as_ref(), record, || {
            self.committed(T::COLLECTION, ChangeKind::Updated, &id);
        })?;
        Self::ignored_if_missing(T::COLLECTION, ChangeKind::Updated, &id, changed);
        Ok(changed)
    }

    fn delete<T: Record>(&self, table: &Table<T>, id: &str) -> StoreResult<bool> {
        let changed = table.remove(self.backend.as_ref(), id, || {
            self.committed(T::COLLECTION, ChangeKind::Deleted, id);
        })?;
        Self::ignored_if_missing(T::COLLECTION, ChangeKind::Deleted, id, changed);
        Ok(changed)
    }

    fn modify<T: Record>(&self, table: &Table<T>, id: &str, f: impl FnOnce(&mut T)) -> StoreResult<bool> {
        let changed = table.modify(self.backend.as_ref(), id, f, || {
            self.committed(T::COLLECTION, ChangeKind::Updated, id);
        })?;
        Self::ignored_if_missing(T::COLLECTION, ChangeKind::Updated, id, changed);
        Ok(changed)
    }

    // Runs under the table's write lock, so feed order matches commit order.
    fn committed(&self, collection: Collection, kind: ChangeKind, id: &str) {
        debug!(%collection, id, ?kind, "committed");
        self.feed.publish(collection, kind, id);
    }

    fn ignored_if_missing(collection: Collection, kind: ChangeKind, id: &str, changed: bool) {
        if !changed {
            debug!(%collection, id, ?kind, "no record with this id, ignored");
        }
    }

    // ---------------------------------------------------------------------
    // Products
    // ---------------------------------------------------------------------

    /// All products, in creation order.
    #[must_use]
    pub fn get_all_products(&self) -> Vec<Product> {
        self.products.snapshot()
    }

    /// First product with `id`.
    #[must_use]
    pub fn get_product(&self, id: &str) -> Option<Product> {
        self.products.find(id)
    }

    /// Append a product; a missing status becomes `DEPLOYED`.
    pub fn add_product(&self, product: Product) -> StoreResult<()> {
        self.add(&self.products, product)
    }

    /// Replace the product with the same id.
    pub fn update_product(&self, product: Product) -> StoreResult<bool> {
        self.update(&self.products, product)
    }

    /// Remove the product(s) with `id`.
    pub fn delete_product(&self, id: &str) -> StoreResult<bool> {
        self.delete(&self.products, id)
    }

    /// Products listed by `supplier_id`.
    #[must_use]
    pub fn products_by_supplier(&self, supplier_id: &str) -> Vec<Product> {
        self.products
            .snapshot()
            .into_iter()
            .filter(|p| p.supplier_id.as_deref() == Some(supplier_id))
            .collect()
    }

    // ---------------------------------------------------------------------
    // Orders
    // ---------------------------------------------------------------------

    /// All orders, newest first.
    #[must_use]
    pub fn get_all_orders(&self) -> Vec<Order> {
        self.orders.snapshot()
    }

    /// First order with `id`.
    #[must_use]
    pub fn get_order(&self, id: &str) -> Option<Order> {
        self.orders.find(id)
    }

    /// Prepend an order.
    pub fn add_order(&self, order: Order) -> StoreResult<()> {
        self.add(&self.orders, order)
    }

    /// Replace the order with the same id.
    pub fn update_order(&self, order: Order) -> StoreResult<bool> {
        self.update(&self.orders, order)
    }

    /// Remove the order(s) with `id`.
    pub fn delete_order(&self, id: &str) -> StoreResult<bool> {
        self.delete(&self.orders, id)
    }

    /// Set the fulfilment status of an order.
    pub fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<bool> {
        self.modify(&self.orders, id, |o| o.status = status)
    }

    // ---------------------------------------------------------------------
    // Requests
    // ---------------------------------------------------------------------

    /// All engagement requests, newest first.
    #[must_use]
    pub fn get_all_requests(&self) -> Vec<EngagementRequest> {
        self.requests.snapshot()
    }

    /// First request with `id`.
    #[must_use]
    pub fn get_request(&self, id: &str) -> Option<EngagementRequest> {
        self.requests.find(id)
    }

    /// Prepend a request.
    pub fn add_request(&self, request: EngagementRequest) -> StoreResult<()> {
        self.add(&self.requests, request)
    }

    /// Replace the request with the same id.
    pub fn update_request(&self, request: EngagementRequest) -> StoreResult<bool> {
        self.update(&self.requests, request)
    }

    /// Remove the request(s) with `id`.
    pub fn delete_request(&self, id: &str) -> StoreResult<bool> {
        self.delete(&self.requests, id)
    }

    /// Set the review status of a request.
    pub fn update_request_status(&self, id: &str, status: RequestStatus) -> StoreResult<bool> {
        self.modify(&self.requests, id, |r| r.status = status)
    }

    /// Permanently remove a request. Same effect as [`delete_request`](Self::delete_request).
    pub fn purge_request(&self, id: &str) -> StoreResult<bool> {
        info!(id, "purging request");
        self.delete_request(id)
    }

    // ---------------------------------------------------------------------
    // Notifications
    // ---------------------------------------------------------------------

    /// All notifications, newest first.
    #[must_use]
    pub fn get_all_notifications(&self) -> Vec<AppNotification> {
        self.notifications.snapshot()
    }

    /// First notification with `id`.
    #[must_use]
    pub fn get_notification(&self, id: &str) -> Option<AppNotification> {
        self.notifications.find(id)
    }

    /// Prepend a notification.
    pub fn add_notification(&self, notification: AppNotification) -> StoreResult<()> {
        self.add(&self.notifications, notification)
    }

    /// Replace the notification with the same id.
    pub fn update_notification(&self, notification: AppNotification) -> StoreResult<bool> {
        self.update(&self.notifications, notification)
    }

    /// Remove the notification(s) with `id`.
    pub fn delete_notification(&self, id: &str) -> StoreResult<bool> {
        self.delete(&self.notifications, id)
    }

    /// Flag a notification as read.
    pub fn mark_notification_as_read(&self, id: &str) -> StoreResult<bool> {
        self.modify(&self.notifications, id, |n| n.read = true)
    }

    /// Notifications a user at `status` should see, newest first.
    #[must_use]
    pub fn notifications_for_tier(&self, status: UserStatus) -> Vec<AppNotification> {
        self.notifications
            .snapshot()
            .into_iter()
            .filter(|n| n.is_visible_to(status))
            .collect()
    }

    /// Unread notifications visible to `status`.
    #[must_use]
    pub fn unread_notification_count(&self, status: UserStatus) -> usize {
        self.notifications_for_tier(status)
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    // ---------------------------------------------------------------------
    // Suppliers
    // ---------------------------------------------------------------------

    /// All suppliers, in onboarding order.
    #[must_use]
    pub fn get_all_suppliers(&self) -> Vec<Supplier> {
        self.suppliers.snapshot()
    }

    /// First supplier with `id`.
    #[must_use]
    pub fn get_supplier(&self, id: &str) -> Option<Supplier> {
        self.suppliers.find(id)
    }

    /// Append a supplier.
    pub fn add_supplier(&self, supplier: Supplier) -> StoreResult<()> {
        self.add(&self.suppliers, supplier)
    }

    /// Replace the supplier with the same id.
    pub fn update_supplier(&self, supplier: Supplier) -> StoreResult<bool> {
        self.update(&self.suppliers, supplier)
    }

    /// Remove the supplier(s) with `id`. Products keep their `supplier_id`.
    pub fn delete_supplier(&self, id: &str) -> StoreResult<bool> {
        self.delete(&self.suppliers, id)
    }

    /// Set the operational status of a supplier.
    pub fn update_supplier_status(&self, id: &str, status: SupplierStatus) -> StoreResult<bool> {
        self.modify(&self.suppliers, id, |s| s.status = status)
    }

    // ---------------------------------------------------------------------
    // Users
    // ---------------------------------------------------------------------

    /// All user accounts, in sign-up order.
    #[must_use]
    pub fn get_all_users(&self) -> Vec<UserAccount> {
        self.users.snapshot()
    }

    /// First user with `id`.
    #[must_use]
    pub fn get_user(&self, id: &str) -> Option<UserAccount> {
        self.users.find(id)
    }

    /// Append a user.
    pub fn add_user(&self, user: UserAccount) -> StoreResult<()> {
        self.add(&self.users, user)
    }

    /// Replace the user with the same id.
    pub fn update_user(&self, user: UserAccount) -> StoreResult<bool> {
        self.update(&self.users, user)
    }

    /// Remove the user(s) with `id`.
    pub fn delete_user(&self, id: &str) -> StoreResult<bool> {
        self.delete(&self.users, id)
    }

    // ---------------------------------------------------------------------
    // Purchases
    // ---------------------------------------------------------------------

    /// Record a checked-out order for `user_id`.
    ///
    /// Adds the order, draws down stock for in-stock product lines, then
    /// credits the order's points to the user and raises their tier if the new
    /// balance earns one (tiers never drop here). Returns the updated user, or
    /// `None` if no user has that id; the order is recorded either way.
    pub fn record_purchase(&self, user_id: &str, order: Order) -> StoreResult<Option<UserAccount>> {
        let points = order.points_earned;
        let drawn: Vec<String> = order
            .items
            .iter()
            .filter_map(|item| match item {
                LineItem::Product(p) if !p.is_pre_order() => Some(p.id.clone()),
                _ => None,
            })
            .collect();

        self.add_order(order)?;

        for product_id in &drawn {
            self.modify(&self.products, product_id, |p| {
                p.scarcity_count = (p.scarcity_count - 1).max(0);
            })?;
        }

        let mut credited = None;
        self.modify(&self.users, user_id, |u| {
            u.points = u.points.saturating_add(points);
            u.status = u.status.max(UserStatus::for_points(u.points));
            u.last_active = Utc::now().format("%Y-%m-%d").to_string();
            credited = Some(u.clone());
        })?;
        Ok(credited)
    }

    // ---------------------------------------------------------------------
    // Export
    // ---------------------------------------------------------------------

    /// JSON form of every record in `collection`, in stored order.
    pub fn records_as_json(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        fn to_values<T: Record>(records: Vec<T>) -> StoreResult<Vec<Value>> {
            records
                .into_iter()
                .map(|r| serde_json::to_value(r).map_err(StoreError::from))
                .collect()
        }

        match collection {
            Collection::Products => to_values(self.get_all_products()),
            Collection::Orders => to_values(self.get_all_orders()),
            Collection::Requests => to_values(self.get_all_requests()),
            Collection::Notifications => to_values(self.get_all_notifications()),
            Collection::Suppliers => to_values(self.get_all_suppliers()),
            Collection::Users => to_values(self.get_all_users()),
        }
    }

    /// CSV export of `collection`; empty string when it has no records.
    pub fn generate_csv(&self, collection: Collection) -> StoreResult<String> {
        Ok(export::to_csv(&self.records_as_json(collection)?))
    }

    /// SQL `INSERT` export of `collection`.
    pub fn generate_sql(&self, collection: Collection) -> StoreResult<String> {
        Ok(export::to_sql(
            collection.name(),
            &self.records_as_json(collection)?,
            Utc::now(),
        ))
    }

    /// Generate an export and hand it to `sink`. Returns the delivered file name.
    pub fn export(
        &self,
        collection: Collection,
        format: ExportFormat,
        sink: &dyn DownloadSink,
    ) -> StoreResult<String> {
        let content = match format {
            ExportFormat::Csv => self.generate_csv(collection)?,
            ExportFormat::Sql => self.generate_sql(collection)?,
        };
        let file_name = export::export_file_name(collection, format, Utc::now().date_naive());
        export::trigger_download(sink, &content, &file_name, format.mime_type())
    }
}
