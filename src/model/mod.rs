//! Record shapes for the six collections.
//!
//! Field names are persisted in camelCase and enum values use the exact tokens
//! the storefront already writes, so existing snapshots decode unchanged.

mod notification;
mod order;
mod product;
mod request;
mod supplier;
mod user;

pub use notification::{AppNotification, NotificationType, TierTarget};
pub use order::{Bundle, LineItem, Order, OrderStatus, OrderType};
pub use product::{Category, EmotionTag, Mood, Product, ProductOrigin, ProductStatus, StyleTag};
pub use request::{EngagementRequest, RequestPriority, RequestStatus, RequestType};
pub use supplier::{Supplier, SupplierStatus};
pub use user::{UserAccount, UserStatus};
