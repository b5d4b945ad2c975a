//! Core types for Carbon Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod footprint;
pub mod id;

pub use email::{Email, EmailError};
pub use footprint::Footprint;
pub use id::*;
