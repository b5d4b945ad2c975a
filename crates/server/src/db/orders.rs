//! Order repository for database operations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use carbon_shop_core::{Footprint, OrderId, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderItem, Product};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    total_carbon: Decimal,
    created_at: DateTime<Utc>,
}

/// Join row for order listing: one line item with its product resolved.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    order_id: i64,
    quantity: i32,
    product_id: i64,
    name: String,
    price: Decimal,
    image: String,
    carbon_footprint: Decimal,
    description: String,
}

impl OrderItemRow {
    fn into_item(self) -> Result<(OrderId, OrderItem), RepositoryError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative quantity {} on order {}",
                self.quantity, self.order_id
            ))
        })?;

        let item = OrderItem {
            product: Product {
                id: ProductId::new(self.product_id),
                name: self.name,
                price: self.price,
                image: self.image,
                carbon_footprint: Footprint::new(self.carbon_footprint),
                description: self.description,
            },
            quantity,
        };

        Ok((OrderId::new(self.order_id), item))
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order with its line items and credit the user's
    /// carbon-saved counter, all in one transaction.
    ///
    /// The counter update is a single `carbon_saved = carbon_saved + $1`
    /// statement, so concurrent orders against the same user cannot lose
    /// increments; running it in the order's transaction means the order
    /// row and the counter can never diverge either.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user no longer exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        lines: &[(Product, u32)],
        total_carbon: Footprint,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO shop.order (user_id, total_carbon)
            VALUES ($1, $2)
            RETURNING id, user_id, total_carbon, created_at
            ",
        )
        .bind(user_id)
        .bind(total_carbon)
        .fetch_one(&mut *tx)
        .await?;

        for (position, (product, quantity)) in lines.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO shop.order_item (order_id, product_id, quantity, position)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order_row.id)
            .bind(product.id)
            .bind(i64::from(*quantity))
            .bind(i64::try_from(position).unwrap_or(i64::MAX))
            .execute(&mut *tx)
            .await?;
        }

        let updated = sqlx::query(
            r"
            UPDATE shop.user
            SET carbon_saved = carbon_saved + $1, updated_at = now()
            WHERE id = $2
            ",
        )
        .bind(total_carbon)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(Order {
            id: OrderId::new(order_row.id),
            user_id,
            items: lines
                .iter()
                .map(|(product, quantity)| OrderItem {
                    product: product.clone(),
                    quantity: *quantity,
                })
                .collect(),
            total_carbon,
            created_at: order_row.created_at,
        })
    }

    /// List a user's orders, newest first, line items resolved to full
    /// product records.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let order_rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, total_carbon, created_at
            FROM shop.order
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        if order_rows.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i64> = order_rows.iter().map(|o| o.id).collect();

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT oi.order_id, oi.quantity,
                   p.id AS product_id, p.name, p.price, p.image,
                   p.carbon_footprint, p.description
            FROM shop.order_item oi
            JOIN shop.product p ON p.id = oi.product_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.order_id, oi.position
            ",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();
        for row in item_rows {
            let (order_id, item) = row.into_item()?;
            items_by_order.entry(order_id).or_default().push(item);
        }

        Ok(order_rows
            .into_iter()
            .map(|row| {
                let id = OrderId::new(row.id);
                Order {
                    id,
                    user_id: UserId::new(row.user_id),
                    items: items_by_order.remove(&id).unwrap_or_default(),
                    total_carbon: Footprint::new(row.total_carbon),
                    created_at: row.created_at,
                }
            })
            .collect())
    }
}
