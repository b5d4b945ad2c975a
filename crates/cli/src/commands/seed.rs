//! Catalog seeding command.
//!
//! Inserts the four shipped products when the catalog is empty; a no-op
//! otherwise. Safe to run any number of times.

use secrecy::SecretString;
use tracing::info;

use carbon_shop_server::db;
use carbon_shop_server::services::catalog;

/// Seed the product catalog.
///
/// # Errors
///
/// Returns an error if environment variables are missing or the database
/// operations fail.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SHOP_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "SHOP_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;

    let inserted = catalog::seed(&pool).await?;
    if inserted == 0 {
        info!("Catalog already seeded, nothing to do");
    } else {
        info!(count = inserted, "Catalog seeded");
    }

    Ok(())
}
