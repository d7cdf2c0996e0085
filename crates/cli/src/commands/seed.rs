//! Demo catalog seeding.
//!
//! Inserts a small catalog (categories, products, one blank with two
//! mockup views) so a fresh database has something to browse. Idempotent:
//! seeding a non-empty catalog is a no-op.

use rust_decimal::Decimal;
use serde_json::json;

use super::{CommandError, connect};

/// Seed the catalog with demo data.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let (product_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;
    if product_count > 0 {
        tracing::info!("Catalog already seeded, nothing to do");
        return Ok(());
    }

    tracing::info!("Seeding catalog...");

    let (tees_id,): (i32,) = sqlx::query_as(
        "INSERT INTO categories (name, slug) VALUES ('Tees', 'tees') RETURNING id",
    )
    .fetch_one(&pool)
    .await?;
    let (hoodies_id,): (i32,) = sqlx::query_as(
        "INSERT INTO categories (name, slug) VALUES ('Hoodies', 'hoodies') RETURNING id",
    )
    .fetch_one(&pool)
    .await?;

    let products = [
        ("Classic Tee", Decimal::new(19_900, 2), tees_id, true),
        ("Pocket Tee", Decimal::new(22_900, 2), tees_id, false),
        ("Zip Hoodie", Decimal::new(39_900, 2), hoodies_id, true),
    ];
    for (title, price, category_id, featured) in products {
        sqlx::query(
            r"
            INSERT INTO products
                (title, price, image_ref, sizes, colors, category_id, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(title)
        .bind(price)
        .bind(format!("catalog/{}.webp", title.to_lowercase().replace(' ', "-")))
        .bind(json!(["S", "M", "L", "XL"]))
        .bind(json!(["white", "black"]))
        .bind(category_id)
        .bind(featured)
        .execute(&pool)
        .await?;
    }

    sqlx::query(
        r"
        INSERT INTO blank_products (name, base_price, sizes, colors, views)
        VALUES ($1, $2, $3, $4, $5)
        ",
    )
    .bind("Heavyweight Blank Tee")
    .bind(Decimal::new(24_900, 2))
    .bind(json!(["S", "M", "L", "XL"]))
    .bind(json!(["white", "black", "sand"]))
    .bind(json!([
        {
            "name": "front",
            "imageRef": "mockups/blank-tee-front.webp",
            "zones": [
                {"name": "chest", "x": 0.3, "y": 0.22, "width": 0.4, "height": 0.35}
            ]
        },
        {
            "name": "back",
            "imageRef": "mockups/blank-tee-back.webp",
            "zones": [
                {"name": "full-back", "x": 0.25, "y": 0.18, "width": 0.5, "height": 0.55}
            ]
        }
    ]))
    .execute(&pool)
    .await?;

    tracing::info!("Catalog seeded");
    Ok(())
}
