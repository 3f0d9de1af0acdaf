//! Cart repository.
//!
//! One row per session. The line items are a JSONB document that is always
//! written whole; there are no partial updates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use odyssey_core::{Cart, CartItem, SessionId};

use super::{CartStore, RepositoryError};

/// `PostgreSQL` cart store.
#[derive(Clone)]
pub struct PgCartStore {
    pool: PgPool,
}

impl PgCartStore {
    /// Create a new cart store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CartRow {
    session_id: SessionId,
    items: Json<Vec<CartItem>>,
    updated_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Self::new(row.session_id, row.items.0, row.updated_at)
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn get_cart(&self, session_id: &SessionId) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            SELECT session_id, items, updated_at
            FROM storefront.carts
            WHERE session_id = $1
            ",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Cart::from))
    }

    async fn save_cart(&self, cart: &Cart) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO storefront.carts (session_id, items, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (session_id)
            DO UPDATE SET items = EXCLUDED.items, updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(&cart.session_id)
        .bind(Json(&cart.items))
        .bind(cart.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_cart(&self, session_id: &SessionId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM storefront.carts WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
