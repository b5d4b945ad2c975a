//! Catalog seeding.
//!
//! The shop ships with four products. Seeding is count-guarded so it is
//! idempotent: it runs at every server startup and via `carbon-cli seed`,
//! and only ever inserts into an empty catalog.

use rust_decimal::Decimal;
use sqlx::PgPool;

use carbon_shop_core::Footprint;

use crate::db::{ProductRepository, RepositoryError};
use crate::models::NewProduct;

/// The canonical seed catalog.
fn seed_items() -> Vec<NewProduct> {
    const IMAGE: &str = "https://via.placeholder.com/150";

    vec![
        NewProduct {
            name: "Eco-friendly T-shirt",
            price: Decimal::new(2599, 2),
            image: IMAGE,
            carbon_footprint: Footprint::new(Decimal::new(25, 1)),
            description: "Made from organic cotton",
        },
        NewProduct {
            name: "Recycled Jeans",
            price: Decimal::new(4999, 2),
            image: IMAGE,
            carbon_footprint: Footprint::new(Decimal::new(42, 1)),
            description: "Made from recycled denim",
        },
        NewProduct {
            name: "Bamboo Toothbrush",
            price: Decimal::new(599, 2),
            image: IMAGE,
            carbon_footprint: Footprint::new(Decimal::new(5, 1)),
            description: "Biodegradable bamboo handle",
        },
        NewProduct {
            name: "Reusable Water Bottle",
            price: Decimal::new(1599, 2),
            image: IMAGE,
            carbon_footprint: Footprint::new(Decimal::new(18, 1)),
            description: "Stainless steel, BPA-free",
        },
    ]
}

/// Seed the catalog if it is empty. Returns the number of products inserted
/// (zero when the catalog was already seeded).
///
/// # Errors
///
/// Returns `RepositoryError` if the count or insert fails.
pub async fn seed(pool: &PgPool) -> Result<usize, RepositoryError> {
    let products = ProductRepository::new(pool);

    if products.count().await? > 0 {
        tracing::debug!("catalog already seeded, skipping");
        return Ok(0);
    }

    let items = seed_items();
    products.insert_all(&items).await?;
    tracing::info!(count = items.len(), "catalog seeded");

    Ok(items.len())
}
