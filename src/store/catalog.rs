//! Catalog store: create and read listings.
//!
//! Listings are immutable once created; there is no update or delete path.

use crate::db::{CreateListingRequest, DbPool, Listing};

use super::StoreError;

/// Placeholder shown when a listing is created without an image.
pub const DEFAULT_IMAGE: &str = "brown-road-bike-free-png.png";

fn validate(req: &CreateListingRequest) -> Result<(), StoreError> {
    let mut missing = Vec::new();
    if req.name.trim().is_empty() {
        missing.push("name");
    }
    if req.location.trim().is_empty() {
        missing.push("location");
    }
    if req.description.trim().is_empty() {
        missing.push("description");
    }
    if req.category.trim().is_empty() {
        missing.push("category");
    }
    if req.condition.trim().is_empty() {
        missing.push("condition");
    }
    if !missing.is_empty() {
        return Err(StoreError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }
    // Negated comparison so NaN is rejected too
    if !(req.price >= 0.0) {
        return Err(StoreError::Validation(
            "price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

/// Persist a new listing and return its id.
pub async fn create_listing(pool: &DbPool, req: CreateListingRequest) -> Result<i64, StoreError> {
    validate(&req)?;

    let image_url = req
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_IMAGE)
        .to_string();

    let now = chrono::Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO listings (name, location, price, description, image_url, category, condition, seller_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(req.name.trim())
    .bind(req.location.trim())
    .bind(req.price)
    .bind(req.description.trim())
    .bind(&image_url)
    .bind(req.category.trim())
    .bind(req.condition.trim())
    .bind(&req.seller_id)
    .bind(&now)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// All listings in a category, newest first.
pub async fn listings_by_category(
    pool: &DbPool,
    category: &str,
) -> Result<Vec<Listing>, StoreError> {
    let listings = sqlx::query_as::<_, Listing>(
        "SELECT * FROM listings WHERE category = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(category)
    .fetch_all(pool)
    .await?;

    Ok(listings)
}

pub async fn listing_by_id(pool: &DbPool, id: i64) -> Result<Listing, StoreError> {
    sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound("listing"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn bike(name: &str, price: f64) -> CreateListingRequest {
        CreateListingRequest {
            name: name.to_string(),
            location: "Mission, SF".to_string(),
            price,
            description: "Well maintained, recently tuned".to_string(),
            image_url: None,
            category: "bikes".to_string(),
            condition: "used".to_string(),
            seller_id: None,
        }
    }

    #[tokio::test]
    async fn created_listing_reads_back_field_for_field() {
        let pool = db::test_pool().await;

        let mut req = bike("Surly Cross-Check", 450.0);
        req.image_url = Some("surly.jpg".to_string());
        let id = create_listing(&pool, req).await.unwrap();

        let listing = listing_by_id(&pool, id).await.unwrap();
        assert_eq!(listing.name, "Surly Cross-Check");
        assert_eq!(listing.location, "Mission, SF");
        assert_eq!(listing.price, 450.0);
        assert_eq!(listing.image_url, "surly.jpg");
        assert_eq!(listing.category, "bikes");
        assert_eq!(listing.condition, "used");
        assert!(listing.seller_id.is_none());
    }

    #[tokio::test]
    async fn blank_image_gets_placeholder() {
        let pool = db::test_pool().await;

        let mut req = bike("Trek FX 2", 300.0);
        req.image_url = Some("   ".to_string());
        let id = create_listing(&pool, req).await.unwrap();

        let listing = listing_by_id(&pool, id).await.unwrap();
        assert_eq!(listing.image_url, DEFAULT_IMAGE);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let pool = db::test_pool().await;

        let mut req = bike("", 100.0);
        req.category = " ".to_string();
        let err = create_listing(&pool, req).await.unwrap_err();
        match err {
            StoreError::Validation(msg) => {
                assert!(msg.contains("name"));
                assert!(msg.contains("category"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let pool = db::test_pool().await;

        let err = create_listing(&pool, bike("Free bike", -1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn category_listing_is_newest_first() {
        let pool = db::test_pool().await;

        let first = create_listing(&pool, bike("Older", 100.0)).await.unwrap();
        let second = create_listing(&pool, bike("Newer", 200.0)).await.unwrap();

        let mut helmet = bike("Giro Fixture", 60.0);
        helmet.category = "helmets".to_string();
        create_listing(&pool, helmet).await.unwrap();

        let bikes = listings_by_category(&pool, "bikes").await.unwrap();
        assert_eq!(
            bikes.iter().map(|l| l.id).collect::<Vec<_>>(),
            vec![second, first]
        );
    }

    #[tokio::test]
    async fn missing_listing_is_not_found() {
        let pool = db::test_pool().await;

        let err = listing_by_id(&pool, 9999).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound("listing")));
    }
}
