//! Product domain types.

use rust_decimal::Decimal;
use serde::Serialize;

use carbon_shop_core::{Footprint, ProductId};

/// A catalog product.
///
/// Catalog entries are created by the one-time seed and otherwise static;
/// there is no update surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    /// Carbon footprint per unit.
    pub carbon_footprint: Footprint,
    /// Marketing description.
    pub description: String,
}

/// A product to insert during catalog seeding (no ID yet).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: &'static str,
    pub price: Decimal,
    pub image: &'static str,
    pub carbon_footprint: Footprint,
    pub description: &'static str,
}
