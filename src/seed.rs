//! Fixture data written on first open.
//!
//! Each function returns the initial contents of one collection in stored
//! order. Two catalog products are supplier listings; [`SUPPLIER_LISTINGS`]
//! links them to seeded suppliers.

use chrono::{DateTime, Utc};

use crate::model::{
    AppNotification, Category, EmotionTag, EngagementRequest, LineItem, Mood, NotificationType,
    Order, OrderStatus, OrderType, Product, ProductOrigin, ProductStatus, RequestPriority,
    RequestStatus, RequestType, StyleTag, Supplier, SupplierStatus, TierTarget, UserAccount,
    UserStatus,
};

/// `(product id, supplier id)` pairs for products listed by a supplier.
pub const SUPPLIER_LISTINGS: [(&str, &str); 2] = [("p3", "sup-1"), ("p5", "sup-2")];

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    statement: &str,
    price: f64,
    mood: Mood,
    category: Category,
    style: StyleTag,
    emotion: EmotionTag,
    scarcity_count: i64,
    social_count: i64,
    fit_confidence: u32,
) -> Product {
    Product {
        description: format!("{name}. Cut in limited runs for the Closet Craze floor."),
        statement: statement.to_string(),
        image: format!("https://cdn.closetcraze.example/products/{id}.jpg"),
        mood,
        scarcity_count,
        social_count,
        fit_confidence,
        category,
        style,
        emotion,
        status: Some(ProductStatus::Deployed),
        origin: Some(ProductOrigin::Admin),
        ..Product::new(id, name, price)
    }
}

/// Seed catalog.
#[must_use]
pub fn products() -> Vec<Product> {
    let mut catalog = vec![
        product(
            "p1",
            "Obsidian Trench",
            "Enter like a verdict.",
            540.0,
            Mood::Noir,
            Category::Outerwear,
            StyleTag::Avant,
            EmotionTag::Confident,
            4,
            812,
            92,
        ),
        product(
            "p2",
            "Gossamer Slip",
            "Weightless, unbothered.",
            210.0,
            Mood::Ethereal,
            Category::Tops,
            StyleTag::Minimal,
            EmotionTag::Serene,
            9,
            344,
            88,
        ),
        product(
            "p3",
            "Voltage Cargo",
            "Pockets with opinions.",
            165.0,
            Mood::Electric,
            Category::Bottoms,
            StyleTag::Street,
            EmotionTag::Rebellious,
            12,
            1290,
            81,
        ),
        product(
            "p4",
            "Feral Lace Boot",
            "Tread where others hesitate.",
            395.0,
            Mood::Feral,
            Category::Footwear,
            StyleTag::Luxe,
            EmotionTag::Mysterious,
            2,
            2057,
            76,
        ),
        product(
            "p5",
            "Halo Cuff",
            "Quiet, until the light hits.",
            120.0,
            Mood::Ethereal,
            Category::Accessories,
            StyleTag::Luxe,
            EmotionTag::Serene,
            0,
            430,
            95,
        ),
    ];

    catalog[0].original_price = Some(620.0);
    catalog[3].is_surging = Some(true);
    catalog[3].surge_price = Some(455.0);
    catalog[3].synthetic_demand = Some(37);
    catalog[4].is_pre_order = Some(true);

    for (product_id, supplier_id) in SUPPLIER_LISTINGS {
        if let Some(p) = catalog.iter_mut().find(|p| p.id == product_id) {
            p.origin = Some(ProductOrigin::Supplier);
            p.supplier_id = Some(supplier_id.to_string());
        }
    }
    catalog
}

/// Seed order history, newest first.
#[must_use]
pub fn orders() -> Vec<Order> {
    let catalog = products();
    vec![
        Order {
            id: "ord-1002".to_string(),
            date: "Oct 2, 2026".to_string(),
            items: vec![LineItem::Product(catalog[1].clone())],
            total: 210.0,
            status: OrderStatus::Processing,
            order_type: OrderType::Standard,
            points_earned: 21,
        },
        Order {
            id: "ord-1001".to_string(),
            date: "Sep 14, 2026".to_string(),
            items: vec![
                LineItem::Product(catalog[0].clone()),
                LineItem::Product(catalog[2].clone()),
            ],
            total: 705.0,
            status: OrderStatus::Received,
            order_type: OrderType::Standard,
            points_earned: 88,
        },
    ]
}

fn ts(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

/// Seed engagement requests, newest first.
#[must_use]
pub fn requests() -> Vec<EngagementRequest> {
    let mut bespoke = EngagementRequest::new(
        "req-3",
        RequestType::Bespoke,
        "@nightshift",
        "Floor-length trench in oxblood, storm flap, no logo.",
        ts("2026-10-12T18:22:00Z"),
    );
    bespoke.target = Some("p1".to_string());
    bespoke.priority = RequestPriority::High;

    let mut supply = EngagementRequest::new(
        "req-2",
        RequestType::Supply,
        "Atelier Nox",
        "Offering 40 units of hand-finished cuffs for next drop.",
        ts("2026-10-09T09:05:00Z"),
    );
    supply.status = RequestStatus::Authorized;

    let mut flagged = EngagementRequest::new(
        "req-1",
        RequestType::Bespoke,
        "@anon_7731",
        "Replica of a competitor runway piece.",
        ts("2026-10-01T23:40:00Z"),
    );
    flagged.status = RequestStatus::Flagged;
    flagged.priority = RequestPriority::Low;

    vec![bespoke, supply, flagged]
}

/// Seed notifications, newest first.
#[must_use]
pub fn notifications() -> Vec<AppNotification> {
    let mut drop = AppNotification::new(
        "n-3",
        NotificationType::Alert,
        "Drop imminent",
        "Feral Lace Boot is surging. Two pairs left.",
        "2026-10-15T08:00:00Z",
    );
    drop.target_tier = Some(TierTarget::All);

    let mut insider = AppNotification::new(
        "n-2",
        NotificationType::Status,
        "Insider access",
        "Early entry to the Obsidian capsule opens tonight.",
        "2026-10-14T17:30:00Z",
    );
    insider.target_tier = Some(TierTarget::Tier(UserStatus::Insider));

    let mut protocol = AppNotification::new(
        "n-1",
        NotificationType::Protocol,
        "Vault protocol updated",
        "Vault capacity now scales with your status tier.",
        "2026-10-10T12:00:00Z",
    );
    protocol.read = true;

    vec![drop, insider, protocol]
}

/// Seed supplier directory.
#[must_use]
pub fn suppliers() -> Vec<Supplier> {
    vec![
        Supplier {
            id: "sup-1".to_string(),
            name: "Atelier Nox".to_string(),
            region: "Antwerp".to_string(),
            specialty: "Technical tailoring".to_string(),
            status: SupplierStatus::Operational,
            resilience_score: 91,
            active_assets: 1,
            onboarded_date: "2025-02-11".to_string(),
        },
        Supplier {
            id: "sup-2".to_string(),
            name: "Lumen Foundry".to_string(),
            region: "Kyoto".to_string(),
            specialty: "Metalwork accessories".to_string(),
            status: SupplierStatus::Operational,
            resilience_score: 84,
            active_assets: 1,
            onboarded_date: "2025-06-30".to_string(),
        },
        Supplier {
            id: "sup-3".to_string(),
            name: "Rift Textiles".to_string(),
            region: "Lagos".to_string(),
            specialty: "Deadstock denim".to_string(),
            status: SupplierStatus::Pending,
            resilience_score: 58,
            active_assets: 0,
            onboarded_date: "2026-09-21".to_string(),
        },
    ]
}

fn user(id: &str, username: &str, status: UserStatus, points: u64, diamonds: u64, joined: &str) -> UserAccount {
    UserAccount {
        id: id.to_string(),
        username: username.to_string(),
        email: format!("{username}@closetcraze.example"),
        status,
        points,
        diamonds,
        joined_date: joined.to_string(),
        last_active: "2026-10-15".to_string(),
    }
}

/// Seed customer accounts.
#[must_use]
pub fn users() -> Vec<UserAccount> {
    vec![
        user("u-1", "vesper", UserStatus::Icon, 18_400, 42, "2024-03-12"),
        user("u-2", "kairo", UserStatus::Trendsetter, 6_150, 11, "2024-11-02"),
        user("u-3", "mothlight", UserStatus::Insider, 1_320, 3, "2025-07-19"),
        user("u-4", "newface", UserStatus::Observer, 40, 0, "2026-10-01"),
    ]
}
