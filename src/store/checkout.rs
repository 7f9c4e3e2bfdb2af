//! Checkout engine: converts a cart into a permanent order.
//!
//! The whole sequence — snapshot, order insert, line inserts, cart clear —
//! runs inside one SQLite transaction. Readers never observe an order
//! without its lines or a cleared cart without an order, and concurrent
//! checkouts for the same owner cannot double-spend a cart.

use tracing::info;

use crate::db::{DbPool, ShippingInfo};

use super::StoreError;

/// One snapshotted cart line: listing id, quantity, unit price as
/// observed at snapshot time.
#[derive(Debug, sqlx::FromRow)]
struct SnapshotLine {
    listing_id: i64,
    quantity: i64,
    price: f64,
}

/// Turn the owner's cart into an order and empty the cart, atomically.
///
/// `buyer_user_id` and `cart_owner_id` may differ: an anonymous session
/// cart can be checked out under an authenticated buyer identity. The two
/// are never merged.
///
/// Returns the new order id. An empty cart fails with `EmptyCart` before
/// any row is written; any storage failure after the order insert rolls
/// the transaction back and surfaces as `CheckoutFailed`.
pub async fn checkout(
    pool: &DbPool,
    buyer_user_id: &str,
    cart_owner_id: &str,
    shipping: &ShippingInfo,
) -> Result<i64, StoreError> {
    let mut tx = pool.begin().await?;

    // Step 1: snapshot cart rows joined with current listing prices.
    // These prices are the ones frozen onto the order lines; they are
    // never re-read.
    let snapshot = sqlx::query_as::<_, SnapshotLine>(
        r#"
        SELECT ci.listing_id, ci.quantity, l.price
        FROM cart_items ci
        JOIN listings l ON l.id = ci.listing_id
        WHERE ci.owner_id = ?
        ORDER BY ci.id ASC
        "#,
    )
    .bind(cart_owner_id)
    .fetch_all(&mut *tx)
    .await?;

    if snapshot.is_empty() {
        return Err(StoreError::EmptyCart);
    }

    let total: f64 = snapshot
        .iter()
        .map(|line| line.quantity as f64 * line.price)
        .sum();

    let now = chrono::Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO orders (user_id, total, ship_name, ship_address, ship_city, ship_postal_code, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(buyer_user_id)
    .bind(total)
    .bind(&shipping.name)
    .bind(&shipping.address)
    .bind(&shipping.city)
    .bind(&shipping.postal_code)
    .bind(&now)
    .execute(&mut *tx)
    .await
    .map_err(StoreError::CheckoutFailed)?;

    let order_id = result.last_insert_rowid();

    for line in &snapshot {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, listing_id, quantity, price_at_purchase)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(order_id)
        .bind(line.listing_id)
        .bind(line.quantity)
        .bind(line.price)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::CheckoutFailed)?;
    }

    sqlx::query("DELETE FROM cart_items WHERE owner_id = ?")
        .bind(cart_owner_id)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::CheckoutFailed)?;

    tx.commit().await.map_err(StoreError::CheckoutFailed)?;

    info!(
        order_id,
        buyer = %buyer_user_id,
        lines = snapshot.len(),
        total,
        "Checkout committed"
    );

    Ok(order_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{self, CreateListingRequest, Order, OrderItem};
    use crate::store::{cart, catalog};

    async fn seed_listing(pool: &DbPool, name: &str, price: f64) -> i64 {
        catalog::create_listing(
            pool,
            CreateListingRequest {
                name: name.to_string(),
                location: "Richmond, SF".to_string(),
                price,
                description: "test item".to_string(),
                image_url: None,
                category: "bikes".to_string(),
                condition: "used".to_string(),
                seller_id: None,
            },
        )
        .await
        .unwrap()
    }

    async fn order_by_id(pool: &DbPool, id: i64) -> Order {
        sqlx::query_as("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn items_of(pool: &DbPool, order_id: i64) -> Vec<OrderItem> {
        sqlx::query_as("SELECT * FROM order_items WHERE order_id = ? ORDER BY id ASC")
            .bind(order_id)
            .fetch_all(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn empty_cart_fails_and_creates_no_order() {
        let pool = db::test_pool().await;

        let err = checkout(&pool, "buyer-1", "sess-1", &ShippingInfo::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::EmptyCart));

        let (orders,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orders, 0);
    }

    #[tokio::test]
    async fn checkout_totals_lines_and_empties_the_cart() {
        let pool = db::test_pool().await;
        let a = seed_listing(&pool, "A", 100.0).await;
        let b = seed_listing(&pool, "B", 50.0).await;

        cart::add_to_cart(&pool, "sess-1", a).await.unwrap();
        cart::add_to_cart(&pool, "sess-1", a).await.unwrap();
        cart::add_to_cart(&pool, "sess-1", b).await.unwrap();

        let order_id = checkout(&pool, "buyer-1", "sess-1", &ShippingInfo::default())
            .await
            .unwrap();

        let order = order_by_id(&pool, order_id).await;
        assert_eq!(order.user_id, "buyer-1");
        assert_eq!(order.total, 250.0);

        let items = items_of(&pool, order_id).await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].listing_id, a);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price_at_purchase, 100.0);
        assert_eq!(items[1].listing_id, b);
        assert_eq!(items[1].quantity, 1);
        assert_eq!(items[1].price_at_purchase, 50.0);

        assert_eq!(cart::cart_count(&pool, "sess-1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn shipping_fields_land_on_the_order_header() {
        let pool = db::test_pool().await;
        let a = seed_listing(&pool, "A", 75.0).await;
        cart::add_to_cart(&pool, "sess-1", a).await.unwrap();

        let shipping = ShippingInfo {
            name: Some("Ada".to_string()),
            address: Some("1 Valencia St".to_string()),
            city: Some("San Francisco".to_string()),
            postal_code: Some("94103".to_string()),
        };
        let order_id = checkout(&pool, "buyer-1", "sess-1", &shipping)
            .await
            .unwrap();

        let order = order_by_id(&pool, order_id).await;
        assert_eq!(order.ship_name.as_deref(), Some("Ada"));
        assert_eq!(order.ship_city.as_deref(), Some("San Francisco"));
        assert_eq!(order.ship_postal_code.as_deref(), Some("94103"));
    }

    #[tokio::test]
    async fn price_at_purchase_survives_later_price_changes() {
        let pool = db::test_pool().await;
        let a = seed_listing(&pool, "A", 100.0).await;
        cart::add_to_cart(&pool, "sess-1", a).await.unwrap();

        let order_id = checkout(&pool, "buyer-1", "sess-1", &ShippingInfo::default())
            .await
            .unwrap();

        // Listings are immutable through this crate's API; poke the row
        // directly to simulate a price change after the sale.
        sqlx::query("UPDATE listings SET price = 200.0 WHERE id = ?")
            .bind(a)
            .execute(&pool)
            .await
            .unwrap();

        let items = items_of(&pool, order_id).await;
        assert_eq!(items[0].price_at_purchase, 100.0);
        assert_eq!(order_by_id(&pool, order_id).await.total, 100.0);
    }

    #[tokio::test]
    async fn failure_after_order_insert_rolls_everything_back() {
        let pool = db::test_pool().await;
        let a = seed_listing(&pool, "A", 100.0).await;
        cart::add_to_cart(&pool, "sess-1", a).await.unwrap();

        // Sabotage the line-item insert so the engine fails mid-sequence.
        sqlx::query("DROP TABLE order_items")
            .execute(&pool)
            .await
            .unwrap();

        let err = checkout(&pool, "buyer-1", "sess-1", &ShippingInfo::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::CheckoutFailed(_)));

        // No order row, and the cart is untouched.
        let (orders,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orders, 0);
        assert_eq!(cart::cart_count(&pool, "sess-1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_checkouts_cannot_double_spend_a_cart() {
        // The in-memory test pool has one connection, which would serialize
        // the two checkouts; use a file-backed WAL database so they really
        // contend.
        let dir = std::env::temp_dir().join(format!("spokes-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let pool = crate::db::init(&dir).await.unwrap();

        let a = seed_listing(&pool, "A", 100.0).await;
        cart::add_to_cart(&pool, "sess-1", a).await.unwrap();

        let shipping = ShippingInfo::default();
        let (first, second) = tokio::join!(
            checkout(&pool, "buyer-1", "sess-1", &shipping),
            checkout(&pool, "buyer-2", "sess-1", &shipping),
        );

        // Exactly one checkout wins; the rival either fails mid-transaction
        // or finds the cart already empty.
        let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);

        let (orders,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orders, 1);
        assert_eq!(cart::cart_count(&pool, "sess-1").await.unwrap(), 0);

        pool.close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn buyer_and_cart_owner_may_differ() {
        let pool = db::test_pool().await;
        let a = seed_listing(&pool, "A", 10.0).await;
        cart::add_to_cart(&pool, "anon-session", a).await.unwrap();

        let order_id = checkout(&pool, "user-7", "anon-session", &ShippingInfo::default())
            .await
            .unwrap();

        assert_eq!(order_by_id(&pool, order_id).await.user_id, "user-7");
        assert_eq!(cart::cart_count(&pool, "anon-session").await.unwrap(), 0);
    }
}
