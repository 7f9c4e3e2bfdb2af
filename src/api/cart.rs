//! Cart endpoints, all scoped to the session-bound cart owner.

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

use crate::db::{
    AddToCartRequest, CartCountResponse, CartView, RemoveFromCartRequest, UpdateCartRequest,
};
use crate::store::cart;
use crate::AppState;

use super::error::ApiError;
use super::session::CartOwner;

/// Add one unit of a listing to the cart
///
/// POST /api/cart/add
pub async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    CartOwner(owner): CartOwner,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<CartCountResponse>, ApiError> {
    cart::add_to_cart(&state.db, &owner, req.listing_id).await?;

    info!(listing_id = req.listing_id, "Added to cart");

    let cart_count = cart::cart_count(&state.db, &owner).await?;
    Ok(Json(CartCountResponse { cart_count }))
}

/// Cart contents with the running total
///
/// GET /api/cart
pub async fn get_cart(
    State(state): State<Arc<AppState>>,
    CartOwner(owner): CartOwner,
) -> Result<Json<CartView>, ApiError> {
    let items = cart::cart_items(&state.db, &owner).await?;
    let total = items
        .iter()
        .map(|item| item.price * item.quantity as f64)
        .sum();
    let cart_count = items.len() as i64;

    Ok(Json(CartView {
        items,
        total,
        cart_count,
    }))
}

/// Set a cart line's quantity; zero or below removes the line
///
/// POST /api/cart/update
pub async fn update_cart(
    State(state): State<Arc<AppState>>,
    CartOwner(owner): CartOwner,
    Json(req): Json<UpdateCartRequest>,
) -> Result<Json<CartCountResponse>, ApiError> {
    cart::update_quantity(&state.db, &owner, req.listing_id, req.quantity).await?;

    let cart_count = cart::cart_count(&state.db, &owner).await?;
    Ok(Json(CartCountResponse { cart_count }))
}

/// Remove a listing from the cart
///
/// POST /api/cart/remove
pub async fn remove_from_cart(
    State(state): State<Arc<AppState>>,
    CartOwner(owner): CartOwner,
    Json(req): Json<RemoveFromCartRequest>,
) -> Result<Json<CartCountResponse>, ApiError> {
    cart::remove_from_cart(&state.db, &owner, req.listing_id).await?;

    let cart_count = cart::cart_count(&state.db, &owner).await?;
    Ok(Json(CartCountResponse { cart_count }))
}

/// Empty the cart
///
/// POST /api/cart/clear
pub async fn clear_cart(
    State(state): State<Arc<AppState>>,
    CartOwner(owner): CartOwner,
) -> Result<Json<CartCountResponse>, ApiError> {
    cart::clear_cart(&state.db, &owner).await?;
    Ok(Json(CartCountResponse { cart_count: 0 }))
}

/// Distinct-listing count for the cart badge
///
/// GET /api/cart/count
pub async fn cart_count(
    State(state): State<Arc<AppState>>,
    CartOwner(owner): CartOwner,
) -> Result<Json<CartCountResponse>, ApiError> {
    let cart_count = cart::cart_count(&state.db, &owner).await?;
    Ok(Json(CartCountResponse { cart_count }))
}
