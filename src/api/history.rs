//! Purchase and selling history, both read-only joins.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::db::{Listing, PurchaseRecord};
use crate::store::accounts;
use crate::AppState;

use super::error::ApiError;

/// Everything a user has bought, most recent order first
///
/// GET /api/users/:id/purchases
pub async fn purchase_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PurchaseRecord>>, ApiError> {
    let records = accounts::purchase_history(&state.db, &id).await?;
    Ok(Json(records))
}

/// Everything a user has listed for sale, newest first
///
/// GET /api/users/:id/listings
pub async fn selling_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let listings = accounts::selling_history(&state.db, &id).await?;
    Ok(Json(listings))
}
