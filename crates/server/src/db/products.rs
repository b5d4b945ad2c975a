//! Product repository for database operations.

use rust_decimal::Decimal;
use sqlx::PgPool;

use carbon_shop_core::{Footprint, ProductId};

use super::RepositoryError;
use crate::models::{NewProduct, Product};

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: Decimal,
    image: String,
    carbon_footprint: Decimal,
    description: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            image: row.image,
            carbon_footprint: Footprint::new(row.carbon_footprint),
            description: row.description,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full catalog, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, image, carbon_footprint, description
            FROM shop.product
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Fetch all products matching the given IDs in one batch lookup.
    ///
    /// IDs with no matching product are simply absent from the result;
    /// callers decide what a missing product means.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();

        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, image, carbon_footprint, description
            FROM shop.product
            WHERE id = ANY($1)
            ",
        )
        .bind(&raw_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count catalog entries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shop.product")
            .fetch_one(self.pool)
            .await?;

        Ok(count.0)
    }

    /// Insert a batch of products in one transaction (used by seeding).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails.
    pub async fn insert_all(&self, products: &[NewProduct]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for product in products {
            sqlx::query(
                r"
                INSERT INTO shop.product (name, price, image, carbon_footprint, description)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(product.name)
            .bind(product.price)
            .bind(product.image)
            .bind(product.carbon_footprint)
            .bind(product.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
