//! Listing models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog item. Immutable once created; there is no edit or delete.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub price: f64,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub condition: String,
    pub seller_id: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateListingRequest {
    pub name: String,
    pub location: String,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: String,
    pub condition: String,
    #[serde(default)]
    pub seller_id: Option<String>,
}
