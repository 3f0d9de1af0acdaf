//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::Storage;
use crate::services::{
    CartService, CatalogService, Clock, IdGenerator, OrderService, SystemClock, UuidGenerator,
};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the storage backend, the domain services and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storage: Storage,
    catalog: CatalogService,
    carts: CartService,
    orders: OrderService,
}

impl AppState {
    /// Create application state using the system clock and random order ids.
    #[must_use]
    pub fn new(config: StorefrontConfig, storage: Storage) -> Self {
        Self::with_clock(config, storage, Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    /// Create application state with an injected clock and id generator.
    #[must_use]
    pub fn with_clock(
        config: StorefrontConfig,
        storage: Storage,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let catalog = CatalogService::new(Arc::clone(&storage.catalog));
        let carts = CartService::new(
            Arc::clone(&storage.carts),
            Arc::clone(&storage.catalog),
            Arc::clone(&clock),
        );
        let orders = OrderService::new(
            Arc::clone(&storage.orders),
            Arc::clone(&storage.carts),
            clock,
            ids,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                catalog,
                carts,
                orders,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.inner.storage
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    #[must_use]
    pub fn carts(&self) -> &CartService {
        &self.inner.carts
    }

    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }
}
