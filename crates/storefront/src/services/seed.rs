//! Sample catalog seeding.
//!
//! The catalog is described in YAML. The storefront embeds
//! `content/catalog.yaml` and seeds it at startup when the catalog is empty;
//! the CLI can seed from any file with the same shape.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use odyssey_core::{Category, Condition, Product, ProductId};

use crate::db::{CatalogStore, RepositoryError};

const SAMPLE_CATALOG: &str = include_str!("../../content/catalog.yaml");

/// Errors that can occur while loading or seeding a catalog.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid product {name}: {reason}")]
    InvalidProduct { name: String, reason: String },

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// A catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedCatalog {
    pub products: Vec<SeedProduct>,
}

/// One product in a catalog document. Products without an id get a fresh UUID.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedProduct {
    #[serde(default)]
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: Category,
    pub image_url: String,
    pub brand: String,
    pub condition: Condition,
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
    #[serde(default = "default_stock")]
    pub stock: i32,
}

const fn default_stock() -> i32 {
    10
}

impl SeedCatalog {
    /// The built-in sample catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded document is malformed.
    pub fn sample() -> Result<Self, SeedError> {
        Self::from_yaml(SAMPLE_CATALOG)
    }

    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Yaml` if the document does not match the schema.
    pub fn from_yaml(source: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn from_file(path: &Path) -> Result<Self, SeedError> {
        let source = tokio::fs::read_to_string(path).await?;
        Self::from_yaml(&source)
    }

    /// Validate every entry and turn it into a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::InvalidProduct` for negative prices or stock.
    pub fn into_products(self) -> Result<Vec<Product>, SeedError> {
        self.products.into_iter().map(Product::try_from).collect()
    }
}

impl TryFrom<SeedProduct> for Product {
    type Error = SeedError;

    fn try_from(seed: SeedProduct) -> Result<Self, Self::Error> {
        if seed.price.is_sign_negative() {
            return Err(SeedError::InvalidProduct {
                name: seed.name,
                reason: "price must not be negative".to_string(),
            });
        }
        if seed.stock < 0 {
            return Err(SeedError::InvalidProduct {
                name: seed.name,
                reason: "stock must not be negative".to_string(),
            });
        }

        Ok(Self {
            id: seed
                .id
                .unwrap_or_else(|| ProductId::new(Uuid::new_v4().to_string())),
            name: seed.name,
            description: seed.description,
            price: seed.price,
            category: seed.category,
            image_url: seed.image_url,
            brand: seed.brand,
            condition: seed.condition,
            sizes: seed.sizes,
            stock: seed.stock,
        })
    }
}

/// Seed `catalog` into the store unless it already holds products.
///
/// Returns the number of products inserted (zero when already seeded).
///
/// # Errors
///
/// Returns an error if the catalog is invalid or the store fails.
pub async fn seed_if_empty(
    store: &dyn CatalogStore,
    catalog: &SeedCatalog,
) -> Result<u64, SeedError> {
    if !store.is_empty().await? {
        tracing::info!("Catalog already seeded");
        return Ok(0);
    }

    let products = catalog.clone().into_products()?;
    let inserted = store.insert_products(&products).await?;
    tracing::info!(count = inserted, "Seeded catalog");
    Ok(inserted)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn test_sample_catalog_parses() {
        let products = SeedCatalog::sample().unwrap().into_products().unwrap();
        assert_eq!(products.len(), 8);

        let sneakers = products
            .iter()
            .filter(|p| p.category == Category::Sneakers)
            .count();
        assert_eq!(sneakers, 4);
        assert!(
            products
                .iter()
                .filter(|p| p.category == Category::Phones)
                .all(|p| p.condition == Condition::Used && p.sizes.is_none())
        );
    }

    #[test]
    fn test_missing_ids_are_generated_and_unique() {
        let products = SeedCatalog::sample().unwrap().into_products().unwrap();
        let mut ids: Vec<_> = products.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_explicit_id_and_default_stock() {
        let catalog = SeedCatalog::from_yaml(
            r"
products:
  - id: fixed-id
    name: Test Runner
    description: A shoe
    price: 10.5
    category: sneakers
    image_url: https://example.com/shoe.jpg
    brand: Acme
    condition: new
    sizes: ['9', '10']
",
        )
        .unwrap();

        let products = catalog.into_products().unwrap();
        let product = products.first().unwrap();
        assert_eq!(product.id.as_str(), "fixed-id");
        assert_eq!(product.stock, 10);
        assert_eq!(product.sizes.as_deref(), Some(&["9".to_string(), "10".to_string()][..]));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let catalog = SeedCatalog::from_yaml(
            r"
products:
  - name: Broken
    description: ''
    price: -1
    category: phones
    image_url: ''
    brand: Acme
    condition: used
",
        )
        .unwrap();

        assert!(matches!(
            catalog.into_products().unwrap_err(),
            SeedError::InvalidProduct { .. }
        ));
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let store = MemoryStore::new();
        let catalog = SeedCatalog::sample().unwrap();

        assert_eq!(seed_if_empty(&store, &catalog).await.unwrap(), 8);
        assert_eq!(seed_if_empty(&store, &catalog).await.unwrap(), 0);
    }
}
