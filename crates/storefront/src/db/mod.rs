//! Storage for the storefront.
//!
//! # Database: `odyssey`
//!
//! Catalog, carts and orders are kept as three independent collections. The
//! `PostgreSQL` backend stores them in schema `storefront`:
//!
//! ## Tables
//!
//! - `products` - Catalog entries, written only by seeding
//! - `carts` - One row per session, line items as JSONB
//! - `orders` - Placed orders, line items frozen as JSONB
//!
//! An in-memory backend implementing the same traits is used for tests and
//! for running without a database (`STOREFRONT_STORAGE=memory`).
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p odyssey-cli -- migrate
//! ```

pub mod carts;
pub mod memory;
pub mod orders;
pub mod products;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use odyssey_core::{Cart, Order, OrderId, Product, ProductFilter, ProductId, SessionId};

pub use carts::PgCartStore;
pub use memory::MemoryStore;
pub use orders::PgOrderStore;
pub use products::PgCatalogStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The backing store cannot serve requests.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Constraint violation (e.g., duplicate id).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Read access to the product catalog, plus the bulk insert used by seeding.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// List products matching `filter` in storage order, at most `limit` of them.
    async fn list_products(
        &self,
        filter: &ProductFilter,
        limit: usize,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Get a single product.
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Whether the catalog holds any product at all.
    async fn is_empty(&self) -> Result<bool, RepositoryError>;

    /// Insert products. Returns how many were written.
    async fn insert_products(&self, products: &[Product]) -> Result<u64, RepositoryError>;
}

/// Cart documents keyed by session.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Get the cart for a session, if one exists.
    async fn get_cart(&self, session_id: &SessionId) -> Result<Option<Cart>, RepositoryError>;

    /// Create or fully replace the cart for `cart.session_id`.
    async fn save_cart(&self, cart: &Cart) -> Result<(), RepositoryError>;

    /// Delete the cart for a session. Returns whether one existed.
    async fn delete_cart(&self, session_id: &SessionId) -> Result<bool, RepositoryError>;
}

/// Placed orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order.
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Get an order by id.
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;
}

/// Handles to every collection, built once at startup and shared by all handlers.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<dyn CatalogStore>,
    pub carts: Arc<dyn CartStore>,
    pub orders: Arc<dyn OrderStore>,
    pool: Option<PgPool>,
}

impl Storage {
    /// Storage backed by a `PostgreSQL` pool.
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            catalog: Arc::new(PgCatalogStore::new(pool.clone())),
            carts: Arc::new(PgCartStore::new(pool.clone())),
            orders: Arc::new(PgOrderStore::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Storage backed by a single in-memory store.
    #[must_use]
    pub fn in_memory(store: MemoryStore) -> Self {
        Self {
            catalog: Arc::new(store.clone()),
            carts: Arc::new(store.clone()),
            orders: Arc::new(store),
            pool: None,
        }
    }

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the database does not answer.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }

    /// Release the underlying connections. Call once at shutdown.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
