//! User registration and lookup.
//!
//! Passwords are hashed here at the HTTP edge; the store only ever sees
//! the opaque hash string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::db::{CreateUserRequest, UserResponse};
use crate::store::accounts;
use crate::AppState;

use super::error::ApiError;

/// Hash a password using Argon2
fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

#[derive(Debug, Deserialize)]
pub struct UserLookupQuery {
    pub email: String,
}

/// Register a new user
///
/// POST /api/users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if req.password.is_empty() {
        return Err(ApiError::validation("password is required"));
    }

    let hash = hash_password(&req.password)
        .map_err(|e| ApiError::internal(format!("failed to hash password: {e}")))?;

    let user = accounts::create_user(&state.db, &req.email, &hash).await?;

    info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Fetch a user by id
///
/// GET /api/users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = accounts::user_by_id(&state.db, &id).await?;
    Ok(Json(user.into()))
}

/// Look a user up by email
///
/// GET /api/users?email=
pub async fn find_user(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserLookupQuery>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = accounts::user_by_email(&state.db, &query.email).await?;
    Ok(Json(user.into()))
}
