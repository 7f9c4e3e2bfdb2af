//! Cart session identity.
//!
//! The cart is scoped to an opaque session-bound id minted on first contact
//! and carried in a cookie, so it stays stable across requests from the
//! same client whether or not they ever register.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use super::error::ApiError;

pub const SESSION_COOKIE: &str = "spokes_session";

/// The session-bound identity a cart is keyed on.
#[derive(Debug, Clone)]
pub struct CartOwner(pub String);

/// Mint a session id if the client does not carry one yet, and expose the
/// owner id to handlers through request extensions.
pub async fn ensure_session(jar: CookieJar, mut request: Request, next: Next) -> (CookieJar, Response) {
    let (jar, owner) = match jar.get(SESSION_COOKIE) {
        Some(cookie) => {
            let owner = cookie.value().to_string();
            (jar, owner)
        }
        None => {
            let owner = Uuid::new_v4().to_string();
            let cookie = Cookie::build((SESSION_COOKIE, owner.clone()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);
            (jar.add(cookie), owner)
        }
    };

    request.extensions_mut().insert(CartOwner(owner));
    let response = next.run(request).await;

    (jar, response)
}

#[async_trait]
impl<S> FromRequestParts<S> for CartOwner
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CartOwner>()
            .cloned()
            .ok_or_else(|| ApiError::internal("session middleware not installed"))
    }
}
