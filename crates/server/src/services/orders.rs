//! Order placement and listing.

use std::collections::HashMap;

use sqlx::PgPool;
use thiserror::Error;

use carbon_shop_core::{Footprint, ProductId, UserId};

use crate::broadcast::{Broadcaster, OrderEvent};
use crate::db::{OrderRepository, ProductRepository, RepositoryError};
use crate::models::{Order, OrderLine, Product};

/// Errors that can occur placing an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The order has no line items.
    #[error("order must contain at least one line item")]
    Empty,

    /// A line item has quantity zero.
    #[error("line item quantity must be at least 1")]
    ZeroQuantity,

    /// A line item references a product that doesn't exist.
    ///
    /// The whole order is rejected: silently skipping the item would charge
    /// the customer for a different basket than they submitted.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Order placement service.
///
/// Owns the full placement flow: validate the cart, batch-resolve the
/// referenced products, compute the footprint total, persist, and publish
/// the broadcast event.
pub struct OrderService<'a> {
    products: ProductRepository<'a>,
    orders: OrderRepository<'a>,
    broadcaster: &'a Broadcaster,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, broadcaster: &'a Broadcaster) -> Self {
        Self {
            products: ProductRepository::new(pool),
            orders: OrderRepository::new(pool),
            broadcaster,
        }
    }

    /// Place an order for the authenticated user.
    ///
    /// The order row, its line items, and the user's carbon-saved increment
    /// are committed in one transaction; the broadcast event is published
    /// only after the commit succeeds.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Empty` / `OrderError::ZeroQuantity` for invalid
    /// carts, `OrderError::UnknownProduct` if any referenced product is
    /// missing, and `OrderError::Repository` for storage failures.
    pub async fn place(&self, user_id: UserId, lines: &[OrderLine]) -> Result<Order, OrderError> {
        if lines.is_empty() {
            return Err(OrderError::Empty);
        }
        if lines.iter().any(|line| line.quantity == 0) {
            return Err(OrderError::ZeroQuantity);
        }

        // One batch lookup for every referenced product
        let ids: Vec<ProductId> = lines.iter().map(|line| line.product).collect();
        let found = self.products.get_by_ids(&ids).await?;
        let by_id: HashMap<ProductId, Product> =
            found.into_iter().map(|p| (p.id, p)).collect();

        let resolved = resolve_lines(lines, &by_id)?;
        let total_carbon = order_total(&resolved);

        let order = self.orders.create(user_id, &resolved, total_carbon).await?;

        self.broadcaster.publish(OrderEvent {
            user_id,
            total_carbon,
        });

        Ok(order)
    }

    /// List the user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.list_for_user(user_id).await?)
    }
}

/// Resolve request lines against the batch lookup result, failing fast on
/// the first missing product.
fn resolve_lines(
    lines: &[OrderLine],
    by_id: &HashMap<ProductId, Product>,
) -> Result<Vec<(Product, u32)>, OrderError> {
    lines
        .iter()
        .map(|line| {
            by_id
                .get(&line.product)
                .cloned()
                .map(|product| (product, line.quantity))
                .ok_or(OrderError::UnknownProduct(line.product))
        })
        .collect()
}

/// Footprint total of an order: Σ (product footprint × quantity).
///
/// Captured once at placement time and stored on the order; later catalog
/// changes never alter historical totals.
fn order_total(lines: &[(Product, u32)]) -> Footprint {
    lines
        .iter()
        .map(|(product, quantity)| product.carbon_footprint.scaled(*quantity))
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i64, footprint: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::new(999, 2),
            image: "https://via.placeholder.com/150".to_string(),
            carbon_footprint: Footprint::new(footprint.parse().unwrap()),
            description: String::new(),
        }
    }

    fn kg(s: &str) -> Footprint {
        Footprint::new(s.parse().unwrap())
    }

    #[test]
    fn test_order_total() {
        // 2 x 2.5 + 1 x 4.2 = 9.2 exactly
        let lines = vec![(product(1, "2.5"), 2), (product(2, "4.2"), 1)];
        assert_eq!(order_total(&lines), kg("9.2"));
    }

    #[test]
    fn test_order_total_single_line() {
        let lines = vec![(product(3, "0.5"), 4)];
        assert_eq!(order_total(&lines), kg("2.0"));
    }

    #[test]
    fn test_resolve_lines_preserves_request_order() {
        let by_id: HashMap<ProductId, Product> = [product(1, "2.5"), product(2, "4.2")]
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        let lines = vec![
            OrderLine {
                product: ProductId::new(2),
                quantity: 1,
            },
            OrderLine {
                product: ProductId::new(1),
                quantity: 2,
            },
        ];

        let resolved = resolve_lines(&lines, &by_id).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved.first().unwrap().0.id, ProductId::new(2));
        assert_eq!(resolved.get(1).unwrap().1, 2);
    }

    #[test]
    fn test_resolve_lines_rejects_missing_product() {
        let by_id: HashMap<ProductId, Product> = [product(1, "2.5")]
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        let lines = vec![
            OrderLine {
                product: ProductId::new(1),
                quantity: 1,
            },
            OrderLine {
                product: ProductId::new(99),
                quantity: 1,
            },
        ];

        let result = resolve_lines(&lines, &by_id);
        assert!(
            matches!(result, Err(OrderError::UnknownProduct(id)) if id == ProductId::new(99))
        );
    }
}
