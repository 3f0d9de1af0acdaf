//! Odyssey Core - Shared domain types.
//!
//! This crate provides the types used across all Odyssey Finds components:
//! - `storefront` - JSON API serving the catalog, carts and orders
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database access,
//! no HTTP. Cart merging and order construction live here so they can be tested
//! without a store.
//!
//! # Modules
//!
//! - [`types`] - Ids, catalog products, carts, orders, statuses and currencies

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
