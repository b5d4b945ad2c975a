//! Domain models and API response shapes.
//!
//! Domain types are what the services and repositories trade in; the serde
//! derives on them produce the JSON wire format (camelCase field names,
//! matching the shapes the shop's clients already consume).

pub mod order;
pub mod product;
pub mod user;

pub use order::{Order, OrderItem, OrderLine};
pub use product::{NewProduct, Product};
pub use user::{PublicUser, User};
