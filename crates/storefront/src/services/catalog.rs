//! Product catalog service.

use std::sync::Arc;

use tracing::instrument;

use odyssey_core::{Product, ProductFilter, ProductId};

use crate::db::{CatalogStore, RepositoryError};

/// Maximum number of products returned by a listing.
pub const PRODUCT_LIST_LIMIT: usize = 100;

/// Read-only access to the catalog.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    /// List up to [`PRODUCT_LIST_LIMIT`] products matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        self.catalog
            .list_products(&filter, PRODUCT_LIST_LIMIT)
            .await
    }

    /// Get one product. `Ok(None)` means the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        self.catalog.get_product(id).await
    }
}
