//! Account and history reads: user records, purchase and selling history.

use uuid::Uuid;

use crate::db::{DbPool, Listing, PurchaseRecord, User};

use super::{map_unique_violation, StoreError};

/// Create a user with an already-hashed credential. Fails `Conflict` when
/// the email is taken.
pub async fn create_user(
    pool: &DbPool,
    email: &str,
    password_hash: &str,
) -> Result<User, StoreError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(StoreError::Validation(
            "a valid email is required".to_string(),
        ));
    }

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query("INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(email)
        .bind(password_hash)
        .bind(&now)
        .execute(pool)
        .await
        .map_err(|e| map_unique_violation(e, "a user with this email already exists"))?;

    Ok(User {
        id,
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        created_at: now,
    })
}

pub async fn user_by_email(pool: &DbPool, email: &str) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound("user"))
}

pub async fn user_by_id(pool: &DbPool, id: &str) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound("user"))
}

/// Everything the user has bought: order header + line + listing snapshot,
/// most recent order first, lines in insertion order within an order.
pub async fn purchase_history(
    pool: &DbPool,
    user_id: &str,
) -> Result<Vec<PurchaseRecord>, StoreError> {
    let records = sqlx::query_as::<_, PurchaseRecord>(
        r#"
        SELECT o.id AS order_id, o.total AS order_total, o.created_at AS order_created_at,
               l.id AS listing_id, l.name AS listing_name, l.image_url,
               oi.quantity, oi.price_at_purchase
        FROM orders o
        JOIN order_items oi ON oi.order_id = o.id
        JOIN listings l ON l.id = oi.listing_id
        WHERE o.user_id = ?
        ORDER BY o.created_at DESC, o.id DESC, oi.id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Everything the user has put up for sale, newest first.
pub async fn selling_history(pool: &DbPool, user_id: &str) -> Result<Vec<Listing>, StoreError> {
    let listings = sqlx::query_as::<_, Listing>(
        "SELECT * FROM listings WHERE seller_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(listings)
}
