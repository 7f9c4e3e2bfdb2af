mod cart;
mod checkout;
mod error;
mod history;
mod listings;
mod session;
mod users;

pub use error::ApiError;
pub use session::CartOwner;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Listings
        .route("/listings", get(listings::list_listings))
        .route("/listings", post(listings::create_listing))
        .route("/listings/:id", get(listings::get_listing))
        // Cart
        .route("/cart", get(cart::get_cart))
        .route("/cart/add", post(cart::add_to_cart))
        .route("/cart/update", post(cart::update_cart))
        .route("/cart/remove", post(cart::remove_from_cart))
        .route("/cart/clear", post(cart::clear_cart))
        .route("/cart/count", get(cart::cart_count))
        // Checkout
        .route("/checkout", post(checkout::checkout))
        // Users & history
        .route("/users", post(users::create_user))
        .route("/users", get(users::find_user))
        .route("/users/:id", get(users::get_user))
        .route("/users/:id/purchases", get(history::purchase_history))
        .route("/users/:id/listings", get(history::selling_history))
        // Every request gets a stable cart session id
        .layer(middleware::from_fn(session::ensure_session));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
