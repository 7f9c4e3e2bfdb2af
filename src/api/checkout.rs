//! Checkout endpoint: cart to order.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::db::{CheckoutRequest, CheckoutResponse};
use crate::store::checkout;
use crate::AppState;

use super::error::ApiError;
use super::session::CartOwner;

/// Convert the session cart into an order.
///
/// POST /api/checkout
///
/// The buyer identity defaults to the session cart owner when the request
/// carries no user id; the two stay distinct parameters all the way down.
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    CartOwner(owner): CartOwner,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError> {
    let buyer = req.user_id.as_deref().unwrap_or(&owner);

    let order_id = checkout::checkout(&state.db, buyer, &owner, &req.shipping).await?;

    Ok((StatusCode::CREATED, Json(CheckoutResponse { order_id })))
}
