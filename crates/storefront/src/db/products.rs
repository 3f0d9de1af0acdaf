//! Product catalog repository.
//!
//! Products keep their insertion order through the `position` column, which is
//! what "storage order" means for listings.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use odyssey_core::{Category, Condition, Product, ProductFilter, ProductId};

use super::{CatalogStore, RepositoryError};

/// `PostgreSQL` catalog store.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Create a new catalog store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    price: Decimal,
    category: String,
    image_url: String,
    brand: String,
    condition: String,
    sizes: Option<Vec<String>>,
    stock: i32,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = row.category.parse::<Category>().map_err(|e| {
            RepositoryError::DataCorruption(format!("product {}: {e}", row.id))
        })?;
        let condition = row.condition.parse::<Condition>().map_err(|e| {
            RepositoryError::DataCorruption(format!("product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            category,
            image_url: row.image_url,
            brand: row.brand,
            condition,
            sizes: row.sizes,
            stock: row.stock,
        })
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_products(
        &self,
        filter: &ProductFilter,
        limit: usize,
    ) -> Result<Vec<Product>, RepositoryError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, category, image_url,
                   brand, condition, sizes, stock
            FROM storefront.products
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR condition = $2)
            ORDER BY position
            LIMIT $3
            ",
        )
        .bind(filter.category.map(|c| c.as_str()))
        .bind(filter.condition.map(|c| c.as_str()))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, category, image_url,
                   brand, condition, sizes, stock
            FROM storefront.products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn is_empty(&self) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM storefront.products)")
                .fetch_one(&self.pool)
                .await?;

        Ok(!exists)
    }

    async fn insert_products(&self, products: &[Product]) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for product in products {
            let result = sqlx::query(
                r"
                INSERT INTO storefront.products (
                    id, name, description, price, category, image_url,
                    brand, condition, sizes, stock
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ",
            )
            .bind(&product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.category.as_str())
            .bind(&product.image_url)
            .bind(&product.brand)
            .bind(product.condition.as_str())
            .bind(product.sizes.as_deref())
            .bind(product.stock)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict(format!(
                        "product {} already exists",
                        product.id
                    ));
                }
                RepositoryError::Database(e)
            })?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
