//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `catalog` - Product listing and lookup
//! - `cart` - Merge-on-add carts with read-time product enrichment
//! - `orders` - Order placement (persists the order, clears the cart)
//! - `seed` - Sample catalog loading
//!
//! Services receive their storage handles, clock and id generator at
//! construction time.

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod seed;

use chrono::{DateTime, Utc};

use odyssey_core::OrderId;

pub use cart::CartService;
pub use catalog::{CatalogService, PRODUCT_LIST_LIMIT};
pub use orders::OrderService;
pub use seed::{SeedCatalog, SeedError, seed_if_empty};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of new order ids.
pub trait IdGenerator: Send + Sync {
    fn next_order_id(&self) -> OrderId;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_order_id(&self) -> OrderId {
        OrderId::random()
    }
}
