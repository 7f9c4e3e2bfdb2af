//! Cart models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A cart row joined with its listing, for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub listing_id: i64,
    pub name: String,
    pub location: String,
    pub price: f64,
    pub image_url: String,
    pub category: String,
    pub condition: String,
    pub quantity: i64,
    pub added_at: String,
}

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub listing_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub listing_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub listing_id: i64,
}

/// Cart contents plus the running total shown on the cart page.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: f64,
    pub cart_count: i64,
}

#[derive(Debug, Serialize)]
pub struct CartCountResponse {
    pub cart_count: i64,
}
