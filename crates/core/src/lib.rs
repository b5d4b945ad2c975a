//! Carbon Shop Core - Shared types library.
//!
//! This crate provides common types used across all Carbon Shop components:
//! - `server` - JSON API backend and WebSocket broadcast
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and footprints

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
