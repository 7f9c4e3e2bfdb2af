//! Listing endpoints: create, browse by category, fetch by id.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::db::{CreateListingRequest, Listing};
use crate::store::catalog;
use crate::AppState;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListingsQuery {
    pub category: String,
}

/// Create a new listing
///
/// POST /api/listings
pub async fn create_listing(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateListingRequest>,
) -> Result<(StatusCode, Json<Listing>), ApiError> {
    let id = catalog::create_listing(&state.db, req).await?;
    let listing = catalog::listing_by_id(&state.db, id).await?;

    info!(listing_id = id, category = %listing.category, "Listing created");

    Ok((StatusCode::CREATED, Json(listing)))
}

/// Browse a category, newest first
///
/// GET /api/listings?category=bikes
pub async fn list_listings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingsQuery>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let listings = catalog::listings_by_category(&state.db, &query.category).await?;
    Ok(Json(listings))
}

/// Fetch a single listing
///
/// GET /api/listings/:id
pub async fn get_listing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Listing>, ApiError> {
    let listing = catalog::listing_by_id(&state.db, id).await?;
    Ok(Json(listing))
}
