//! Order and order-line models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A checkout receipt. Read-only after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: String,
    pub total: f64,
    pub ship_name: Option<String>,
    pub ship_address: Option<String>,
    pub ship_city: Option<String>,
    pub ship_postal_code: Option<String>,
    pub created_at: String,
}

/// A line within an order. `price_at_purchase` is frozen at checkout
/// time and never tracks later listing price changes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub listing_id: i64,
    pub quantity: i64,
    pub price_at_purchase: f64,
}

/// Shipping fields captured on the order header.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Buyer identity; falls back to the session cart owner when absent.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub shipping: ShippingInfo,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: i64,
}

/// One purchase-history row: order header + line item + listing snapshot.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PurchaseRecord {
    pub order_id: i64,
    pub order_total: f64,
    pub order_created_at: String,
    pub listing_id: i64,
    pub listing_name: String,
    pub image_url: String,
    pub quantity: i64,
    pub price_at_purchase: f64,
}
