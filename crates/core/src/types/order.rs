//! Orders.
//!
//! An order is an immutable snapshot of what the client submitted. The total
//! is taken as given and the items are not checked against the catalog or the
//! session's cart.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartItem;
use super::id::{OrderId, SessionId};
use super::status::OrderStatus;

/// Client-submitted order payload. Every field is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderCreate {
    pub session_id: SessionId,
    pub items: Vec<CartItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub currency: String,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub session_id: SessionId,
    pub items: Vec<CartItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub currency: String,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Turn a payload into a pending order.
    ///
    /// The id and timestamp are supplied by the caller rather than defaulted
    /// here, so callers decide how they are generated.
    #[must_use]
    pub fn place(id: OrderId, created_at: DateTime<Utc>, payload: OrderCreate) -> Self {
        let OrderCreate {
            session_id,
            items,
            total,
            currency,
            customer_name,
            customer_email,
            shipping_address,
        } = payload;

        Self {
            id,
            session_id,
            items,
            total,
            currency,
            customer_name,
            customer_email,
            shipping_address,
            status: OrderStatus::Pending,
            created_at,
        }
    }
}
