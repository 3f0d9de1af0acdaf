//! Order repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use odyssey_core::{CartItem, Order, OrderId, OrderStatus, SessionId};

use super::{OrderStore, RepositoryError};

/// `PostgreSQL` order store.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    /// Create a new order store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    session_id: SessionId,
    items: Json<Vec<CartItem>>,
    total: Decimal,
    currency: String,
    customer_name: String,
    customer_email: String,
    shipping_address: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<OrderStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("order {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            session_id: row.session_id,
            items: row.items.0,
            total: row.total,
            currency: row.currency,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            shipping_address: row.shipping_address,
            status,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO storefront.orders (
                id, session_id, items, total, currency, customer_name,
                customer_email, shipping_address, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(order.id)
        .bind(&order.session_id)
        .bind(Json(&order.items))
        .bind(order.total)
        .bind(&order.currency)
        .bind(&order.customer_name)
        .bind(&order.customer_email)
        .bind(&order.shipping_address)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(format!("order {} already exists", order.id));
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, session_id, items, total, currency, customer_name,
                   customer_email, shipping_address, status, created_at
            FROM storefront.orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }
}
