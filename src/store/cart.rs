//! Cart store: per-owner (listing, quantity) rows.
//!
//! The cart owner is an opaque session-bound string, not necessarily a
//! registered user. At most one row exists per (owner, listing); repeated
//! adds increment the quantity via a single upsert so concurrent adds for
//! the same owner cannot lose an increment.

use crate::db::{CartItem, DbPool};

use super::StoreError;

/// Add one unit of a listing to the owner's cart, inserting or
/// incrementing as needed. Fails `NotFound` when the listing is missing.
pub async fn add_to_cart(pool: &DbPool, owner: &str, listing_id: i64) -> Result<(), StoreError> {
    let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM listings WHERE id = ?")
        .bind(listing_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(StoreError::NotFound("listing"));
    }

    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO cart_items (owner_id, listing_id, quantity, added_at)
        VALUES (?, ?, 1, ?)
        ON CONFLICT(owner_id, listing_id) DO UPDATE SET quantity = quantity + 1
        "#,
    )
    .bind(owner)
    .bind(listing_id)
    .bind(&now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Set the quantity for a cart row. Quantities at or below zero delete
/// the row instead; zero is never persisted.
pub async fn update_quantity(
    pool: &DbPool,
    owner: &str,
    listing_id: i64,
    quantity: i64,
) -> Result<(), StoreError> {
    if quantity <= 0 {
        return remove_from_cart(pool, owner, listing_id).await;
    }

    sqlx::query("UPDATE cart_items SET quantity = ? WHERE owner_id = ? AND listing_id = ?")
        .bind(quantity)
        .bind(owner)
        .bind(listing_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove one listing from the cart. Succeeds even when no row matches.
pub async fn remove_from_cart(
    pool: &DbPool,
    owner: &str,
    listing_id: i64,
) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM cart_items WHERE owner_id = ? AND listing_id = ?")
        .bind(owner)
        .bind(listing_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Empty the owner's cart. Succeeds even when the cart is already empty.
pub async fn clear_cart(pool: &DbPool, owner: &str) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM cart_items WHERE owner_id = ?")
        .bind(owner)
        .execute(pool)
        .await?;

    Ok(())
}

/// The owner's cart joined with listing fields, newest-added first.
pub async fn cart_items(pool: &DbPool, owner: &str) -> Result<Vec<CartItem>, StoreError> {
    let items = sqlx::query_as::<_, CartItem>(
        r#"
        SELECT ci.listing_id, l.name, l.location, l.price, l.image_url,
               l.category, l.condition, ci.quantity, ci.added_at
        FROM cart_items ci
        JOIN listings l ON l.id = ci.listing_id
        WHERE ci.owner_id = ?
        ORDER BY ci.added_at DESC, ci.id DESC
        "#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Count of distinct listings in the cart (not summed quantities); feeds
/// the cart badge.
pub async fn cart_count(pool: &DbPool, owner: &str) -> Result<i64, StoreError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cart_items WHERE owner_id = ?")
        .bind(owner)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
