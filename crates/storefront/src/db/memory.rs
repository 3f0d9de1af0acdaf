//! In-memory store for tests and database-less runs.
//!
//! Implements every storage trait over plain collections behind a shared
//! `RwLock`. Clones share the same data.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use odyssey_core::{Cart, Order, OrderId, Product, ProductFilter, ProductId, SessionId};

use super::{CartStore, CatalogStore, OrderStore, RepositoryError};

#[derive(Default)]
struct Collections {
    // Vec rather than map: listing follows insertion order.
    products: Vec<Product>,
    carts: HashMap<SessionId, Cart>,
    orders: HashMap<OrderId, Order>,
}

/// In-memory store backed by shared collections.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, RepositoryError> {
        self.inner
            .read()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, RepositoryError> {
        self.inner
            .write()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".into()))
    }

    /// Drop a product from the catalog, leaving carts that reference it alone.
    #[cfg(test)]
    pub(crate) fn remove_product(&self, id: &ProductId) {
        if let Ok(mut data) = self.write() {
            data.products.retain(|p| &p.id != id);
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_products(
        &self,
        filter: &ProductFilter,
        limit: usize,
    ) -> Result<Vec<Product>, RepositoryError> {
        let data = self.read()?;
        Ok(data
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let data = self.read()?;
        Ok(data.products.iter().find(|p| &p.id == id).cloned())
    }

    async fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.read()?.products.is_empty())
    }

    async fn insert_products(&self, products: &[Product]) -> Result<u64, RepositoryError> {
        let mut data = self.write()?;

        for product in products {
            if data.products.iter().any(|p| p.id == product.id) {
                return Err(RepositoryError::Conflict(format!(
                    "product {} already exists",
                    product.id
                )));
            }
        }

        data.products.extend_from_slice(products);
        Ok(products.len() as u64)
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn get_cart(&self, session_id: &SessionId) -> Result<Option<Cart>, RepositoryError> {
        Ok(self.read()?.carts.get(session_id).cloned())
    }

    async fn save_cart(&self, cart: &Cart) -> Result<(), RepositoryError> {
        self.write()?
            .carts
            .insert(cart.session_id.clone(), cart.clone());
        Ok(())
    }

    async fn delete_cart(&self, session_id: &SessionId) -> Result<bool, RepositoryError> {
        Ok(self.write()?.carts.remove(session_id).is_some())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut data = self.write()?;
        if data.orders.contains_key(&order.id) {
            return Err(RepositoryError::Conflict(format!(
                "order {} already exists",
                order.id
            )));
        }
        data.orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.read()?.orders.get(&id).cloned())
    }
}
