//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carbon_shop_core::{Footprint, OrderId, ProductId, UserId};

use super::product::Product;

/// One line of an order request: a product reference and a quantity.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OrderLine {
    /// Referenced product.
    pub product: ProductId,
    /// Units ordered.
    pub quantity: u32,
}

/// A line item on a placed order, with the product resolved.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub product: Product,
    pub quantity: u32,
}

/// A placed order. Immutable after creation.
///
/// `total_carbon` is the footprint sum captured at placement time; later
/// catalog changes do not retroactively alter it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The user who placed the order.
    #[serde(rename = "user")]
    pub user_id: UserId,
    /// Line items in the order they were submitted.
    #[serde(rename = "products")]
    pub items: Vec<OrderItem>,
    /// Footprint total at placement time.
    pub total_carbon: Footprint,
    /// When the order was placed.
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i64, footprint: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: "Recycled Jeans".to_string(),
            price: Decimal::new(4999, 2),
            image: "https://via.placeholder.com/150".to_string(),
            carbon_footprint: Footprint::new(footprint.parse().unwrap()),
            description: "Made from recycled denim".to_string(),
        }
    }

    #[test]
    fn test_order_wire_format() {
        let order = Order {
            id: OrderId::new(10),
            user_id: UserId::new(5),
            items: vec![OrderItem {
                product: product(2, "4.2"),
                quantity: 1,
            }],
            total_carbon: Footprint::new("4.2".parse().unwrap()),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], 10);
        assert_eq!(json["user"], 5);
        assert_eq!(json["totalCarbon"], "4.2");
        assert_eq!(json["products"][0]["quantity"], 1);
        assert_eq!(json["products"][0]["product"]["id"], 2);
        assert!(json.get("date").is_some());
    }

    #[test]
    fn test_order_line_deserializes_request_shape() {
        let line: OrderLine = serde_json::from_str(r#"{"product": 2, "quantity": 3}"#).unwrap();
        assert_eq!(line.product, ProductId::new(2));
        assert_eq!(line.quantity, 3);
    }
}
