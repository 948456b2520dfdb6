//! End-to-end tests of the collection store contract.
//!
//! These tests verify:
//! - write-through persistence and reopen against the same medium
//! - insertion order per collection
//! - update/delete no-op and idempotence semantics
//! - defensive copies
//! - snapshot migration and corruption handling

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use closet_store::{
    AppNotification, ChangeKind, Collection, CollectionStore, EngagementRequest,
    InMemoryKeyValueStore, KeyValueStore, NotificationType, Order, OrderStatus, OrderType,
    Product, ProductStatus, RequestType, StoreConfig, StoreError, Supplier, SupplierStatus,
    UserAccount, UserStatus,
};

fn empty_store(kv: &InMemoryKeyValueStore) -> CollectionStore {
    CollectionStore::open(Arc::new(kv.clone()), StoreConfig::unseeded()).unwrap()
}

fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn request(id: &str) -> EngagementRequest {
    EngagementRequest::new(id, RequestType::Supply, "Atelier Nox", "40 cuffs", at("2026-10-01T00:00:00Z"))
}

fn order(id: &str) -> Order {
    Order {
        id: id.to_string(),
        date: "Oct 16, 2026".to_string(),
        items: Vec::new(),
        total: 0.0,
        status: OrderStatus::Processing,
        order_type: OrderType::Standard,
        points_earned: 0,
    }
}

fn supplier(id: &str) -> Supplier {
    Supplier {
        id: id.to_string(),
        name: format!("Supplier {id}"),
        region: "Antwerp".to_string(),
        specialty: "Tailoring".to_string(),
        status: SupplierStatus::Pending,
        resilience_score: 70,
        active_assets: 0,
        onboarded_date: "2026-10-16".to_string(),
    }
}

fn user(id: &str) -> UserAccount {
    UserAccount {
        id: id.to_string(),
        username: id.to_string(),
        email: format!("{id}@closetcraze.example"),
        status: UserStatus::Observer,
        points: 0,
        diamonds: 0,
        joined_date: "2026-10-16".to_string(),
        last_active: "2026-10-16".to_string(),
    }
}

#[test]
fn test_product_lifecycle_scenario() {
    let kv = InMemoryKeyValueStore::new();
    let store = empty_store(&kv);
    assert!(store.get_all_products().is_empty());

    store.add_product(Product::new("p1", "Coat", 500.0)).unwrap();
    let products = store.get_all_products();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].status, Some(ProductStatus::Deployed));

    let mut archived = products[0].clone();
    archived.status = Some(ProductStatus::Archived);
    assert!(store.update_product(archived).unwrap());
    assert_eq!(store.get_all_products()[0].status, Some(ProductStatus::Archived));

    assert!(store.delete_product("p1").unwrap());
    assert_eq!(store.get_all_products().len(), 0);
}

#[test]
fn test_requests_are_newest_first() {
    let kv = InMemoryKeyValueStore::new();
    let store = empty_store(&kv);
    store.add_request(request("r1")).unwrap();
    store.add_request(request("r2")).unwrap();
    let ids: Vec<String> = store.get_all_requests().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, ["r2", "r1"]);
}

#[test]
fn test_insertion_order_per_collection() {
    let kv = InMemoryKeyValueStore::new();
    let store = empty_store(&kv);

    store.add_order(order("a")).unwrap();
    store.add_order(order("b")).unwrap();
    store
        .add_notification(AppNotification::new("a", NotificationType::Info, "A", "", "t"))
        .unwrap();
    store
        .add_notification(AppNotification::new("b", NotificationType::Info, "B", "", "t"))
        .unwrap();
    store.add_product(Product::new("a", "A", 1.0)).unwrap();
    store.add_product(Product::new("b", "B", 1.0)).unwrap();
    store.add_supplier(supplier("a")).unwrap();
    store.add_supplier(supplier("b")).unwrap();
    store.add_user(user("a")).unwrap();
    store.add_user(user("b")).unwrap();

    let orders: Vec<String> = store.get_all_orders().into_iter().map(|o| o.id).collect();
    let notes: Vec<String> = store.get_all_notifications().into_iter().map(|n| n.id).collect();
    let products: Vec<String> = store.get_all_products().into_iter().map(|p| p.id).collect();
    let suppliers: Vec<String> = store.get_all_suppliers().into_iter().map(|s| s.id).collect();
    let users: Vec<String> = store.get_all_users().into_iter().map(|u| u.id).collect();

    assert_eq!(orders, ["b", "a"]);
    assert_eq!(notes, ["b", "a"]);
    assert_eq!(products, ["a", "b"]);
    assert_eq!(suppliers, ["a", "b"]);
    assert_eq!(users, ["a", "b"]);
}

#[test]
fn test_reopen_returns_identical_collections() {
    let kv = InMemoryKeyValueStore::new();
    {
        let store = empty_store(&kv);
        let mut p = Product::new("p1", "Coat", 500.0);
        p.original_price = Some(620.0);
        p.supplier_id = Some("sup-1".to_string());
        store.add_product(p).unwrap();
        store.add_request(request("r1")).unwrap();
        store.add_user(user("u1")).unwrap();
    }

    let reopened = empty_store(&kv);
    let products = reopened.get_all_products();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].original_price, Some(620.0));
    assert_eq!(products[0].supplier_id.as_deref(), Some("sup-1"));
    assert_eq!(reopened.get_all_requests(), vec![request("r1")]);
    assert_eq!(reopened.get_all_users(), vec![user("u1")]);
}

#[test]
fn test_seeded_reopen_does_not_reseed() {
    let kv = InMemoryKeyValueStore::new();
    let first = CollectionStore::open(Arc::new(kv.clone()), StoreConfig::default()).unwrap();
    let seeded_products = first.get_all_products();
    assert!(!seeded_products.is_empty());
    for p in &seeded_products {
        first.delete_product(&p.id).unwrap();
    }
    drop(first);

    let second = CollectionStore::open(Arc::new(kv), StoreConfig::default()).unwrap();
    assert!(second.get_all_products().is_empty());
    assert!(!second.get_all_users().is_empty());
}

#[test]
fn test_every_mutation_is_written_through() {
    let kv = InMemoryKeyValueStore::new();
    let store = empty_store(&kv);
    let key = store.key(Collection::Suppliers).to_string();

    store.add_supplier(supplier("s1")).unwrap();
    let raw = kv.get(&key).unwrap().unwrap();
    assert!(raw.contains(r#""id":"s1""#));

    store.update_supplier_status("s1", SupplierStatus::Operational).unwrap();
    let raw = kv.get(&key).unwrap().unwrap();
    assert!(raw.contains("OPERATIONAL"));

    store.delete_supplier("s1").unwrap();
    let raw = kv.get(&key).unwrap().unwrap();
    assert!(raw.contains(r#""records":[]"#));
}

#[test]
fn test_update_missing_id_creates_nothing() {
    let kv = InMemoryKeyValueStore::new();
    let store = empty_store(&kv);
    assert!(!store.update_product(Product::new("ghost", "Ghost", 1.0)).unwrap());
    assert!(store.get_all_products().is_empty());
}

#[test]
fn test_update_and_delete_are_idempotent() {
    let kv = InMemoryKeyValueStore::new();
    let store = empty_store(&kv);
    store.add_user(user("u1")).unwrap();
    store.add_user(user("u2")).unwrap();

    let mut changed = user("u1");
    changed.points = 1_200;
    changed.status = UserStatus::Insider;
    store.update_user(changed.clone()).unwrap();
    let once = store.get_all_users();
    store.update_user(changed).unwrap();
    assert_eq!(store.get_all_users(), once);

    assert!(store.delete_user("u2").unwrap());
    let after_one = store.get_all_users();
    assert!(!store.delete_user("u2").unwrap());
    assert_eq!(store.get_all_users(), after_one);
}

#[test]
fn test_get_all_returns_defensive_copies() {
    let kv = InMemoryKeyValueStore::new();
    let store = empty_store(&kv);
    store.add_product(Product::new("p1", "Coat", 500.0)).unwrap();

    let mut copy = store.get_all_products();
    copy[0].name = "Tampered".to_string();
    copy.push(Product::new("p2", "Extra", 1.0));
    copy.clear();

    let fresh = store.get_all_products();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].name, "Coat");
}

#[test]
fn test_duplicate_ids_coexist_with_find_first() {
    let kv = InMemoryKeyValueStore::new();
    let store = empty_store(&kv);
    store.add_product(Product::new("p1", "First", 1.0)).unwrap();
    store.add_product(Product::new("p1", "Second", 2.0)).unwrap();
    assert_eq!(store.get_all_products().len(), 2);

    store.update_product(Product::new("p1", "Renamed", 3.0)).unwrap();
    let names: Vec<String> = store.get_all_products().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["Renamed", "Second"]);
}

#[test]
fn test_historical_orders_are_snapshots() {
    let kv = InMemoryKeyValueStore::new();
    let store = empty_store(&kv);
    let mut coat = Product::new("p1", "Coat", 500.0);
    coat.scarcity_count = 3;
    store.add_product(coat.clone()).unwrap();

    let mut cart = closet_store::Cart::new(UserStatus::Observer);
    let now = Utc::now();
    cart.add_product(&store.get_product("p1").unwrap(), now).unwrap();
    let placed = cart.checkout(now).unwrap();
    store.record_purchase("nobody", placed.clone()).unwrap();
    assert_eq!(store.get_product("p1").unwrap().scarcity_count, 2);

    coat.name = "Coat v2".to_string();
    coat.price = 900.0;
    store.update_product(coat).unwrap();

    let stored = store.get_order(&placed.id).unwrap();
    assert_eq!(stored.items[0].id(), "p1");
    assert!((stored.items[0].price() - 500.0).abs() < f64::EPSILON);
}

#[test]
fn test_persistence_failure_is_surfaced_and_memory_kept() {
    let kv = InMemoryKeyValueStore::with_quota(2_000);
    let store = CollectionStore::open(Arc::new(kv.clone()), StoreConfig::unseeded()).unwrap();
    store.add_product(Product::new("p1", "Coat", 500.0)).unwrap();

    let mut huge = Product::new("p2", "Monument", 1.0);
    huge.description = "x".repeat(4_000);
    let err = store.add_product(huge).unwrap_err();
    assert!(err.is_persistence());

    assert_eq!(store.get_all_products().len(), 1);
    let reopened = CollectionStore::open(Arc::new(kv), StoreConfig::unseeded()).unwrap();
    assert_eq!(reopened.get_all_products(), store.get_all_products());
}

#[test]
fn test_legacy_bare_array_is_migrated() {
    let kv = InMemoryKeyValueStore::new();
    let legacy = r#"[{"id":"u1","username":"vesper","email":"v@x","status":"Icon",
        "points":18400,"diamonds":3,"joinedDate":"2024-03-12","lastActive":"2026-10-01"}]"#;
    kv.set("closet_craze_users", legacy).unwrap();

    let store = CollectionStore::open(Arc::new(kv.clone()), StoreConfig::unseeded()).unwrap();
    assert_eq!(store.get_all_users()[0].status, UserStatus::Icon);

    let raw = kv.get("closet_craze_users").unwrap().unwrap();
    assert!(raw.starts_with(r#"{"schemaVersion":1"#));
}

#[test]
fn test_corrupt_snapshot_fails_open() {
    let kv = InMemoryKeyValueStore::new();
    kv.set("closet_craze_orders", "{\"schemaVersion\":1,\"records\":[{\"id\":").unwrap();
    let err = CollectionStore::open(Arc::new(kv), StoreConfig::default()).unwrap_err();
    assert!(matches!(err, StoreError::CorruptSnapshot { ref key, .. } if key == "closet_craze_orders"));
}

#[test]
fn test_custom_prefix_owns_only_six_keys() {
    let kv = InMemoryKeyValueStore::new();
    kv.set("override_credential", "secret").unwrap();
    let config = StoreConfig {
        key_prefix: "shop.".to_string(),
        ..StoreConfig::default()
    };
    let store = CollectionStore::open(Arc::new(kv.clone()), config).unwrap();
    assert_eq!(store.key(Collection::Users), "shop.users");

    let keys = kv.keys().unwrap();
    assert_eq!(keys.len(), 7);
    assert_eq!(kv.get("override_credential").unwrap().as_deref(), Some("secret"));
    for collection in Collection::ALL {
        assert!(keys.contains(&format!("shop.{collection}")));
    }
}

#[test]
fn test_change_feed_reports_commits_only() {
    let kv = InMemoryKeyValueStore::new();
    let store = empty_store(&kv);
    let feed = store.subscribe();

    store.add_request(request("r1")).unwrap();
    store.update_request_status("missing", closet_store::RequestStatus::Flagged).unwrap();
    store.purge_request("r1").unwrap();

    let first = feed.recv_timeout(Duration::from_millis(100)).unwrap();
    assert_eq!((first.collection, first.kind, first.id.as_str()), (Collection::Requests, ChangeKind::Added, "r1"));
    let events = feed.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, ChangeKind::Deleted);
}

#[test]
fn test_concurrent_writers_lose_nothing() {
    let kv = InMemoryKeyValueStore::new();
    let store = Arc::new(empty_store(&kv));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..25 {
                    store.add_order(order(&format!("t{t}-{i}"))).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.get_all_orders().len(), 100);
    let reopened = empty_store(&kv);
    assert_eq!(reopened.get_all_orders().len(), 100);
}

#[test]
fn test_non_finite_prices_are_rejected_and_store_reopens() {
    let kv = InMemoryKeyValueStore::new();
    let store = empty_store(&kv);
    store.add_product(Product::new("p1", "Coat", 500.0)).unwrap();

    let err = store.add_product(Product::new("p2", "Void", f64::NAN)).unwrap_err();
    assert!(matches!(err, StoreError::Serialization(_)), "{err}");

    let mut surging = store.get_product("p1").unwrap();
    surging.surge_price = Some(f64::INFINITY);
    assert!(store.update_product(surging).is_err());

    let mut bad_order = order("o1");
    bad_order.total = f64::NEG_INFINITY;
    assert!(store.add_order(bad_order).is_err());

    let raw = kv.get("closet_craze_products").unwrap().unwrap();
    assert!(!raw.contains("null"));

    let reopened = empty_store(&kv);
    assert_eq!(reopened.get_all_products(), store.get_all_products());
    assert_eq!(reopened.get_all_products().len(), 1);
    assert!(reopened.get_all_orders().is_empty());
}

#[test]
fn test_feed_order_matches_commit_order_under_contention() {
    let kv = InMemoryKeyValueStore::new();
    let store = Arc::new(empty_store(&kv));
    let feed = store.subscribe();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..20 {
                    store.add_order(order(&format!("t{t}-{i}"))).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let published: Vec<String> = feed.drain().into_iter().map(|e| e.id).collect();
    let mut committed: Vec<String> = store.get_all_orders().into_iter().map(|o| o.id).collect();
    committed.reverse();
    assert_eq!(published, committed);
}
