//! Order placement.
//!
//! Orders are built from the submitted payload alone. The session's cart is
//! never read; it is deleted after the order is stored, whatever it held.

use std::sync::Arc;

use tracing::instrument;

use odyssey_core::{Order, OrderCreate};

use super::{Clock, IdGenerator};
use crate::db::{CartStore, OrderStore, RepositoryError};

/// Places orders and clears the originating cart.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    carts: Arc<dyn CartStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl OrderService {
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrderStore>,
        carts: Arc<dyn CartStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            orders,
            carts,
            clock,
            ids,
        }
    }

    /// Persist a pending order and delete the session's cart.
    ///
    /// The total, items and currency are stored exactly as submitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be stored or the cart cannot be
    /// deleted. A failed cart delete leaves the stored order in place.
    #[instrument(skip(self, payload), fields(session_id = %payload.session_id, lines = payload.items.len()))]
    pub async fn create(&self, payload: OrderCreate) -> Result<Order, RepositoryError> {
        let order = Order::place(self.ids.next_order_id(), self.clock.now(), payload);

        self.orders.insert_order(&order).await?;
        self.carts.delete_cart(&order.session_id).await?;

        tracing::info!(order_id = %order.id, total = %order.total, currency = %order.currency, "Order placed");
        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use odyssey_core::{Cart, CartItem, OrderId, OrderStatus, SessionId};

    use super::*;
    use crate::db::MemoryStore;
    use crate::services::testing::SequentialIds;
    use crate::services::{SystemClock, UuidGenerator};

    fn payload(session: &str, product: &str) -> OrderCreate {
        OrderCreate {
            session_id: SessionId::new(session),
            items: vec![CartItem::new(product, 1, None).unwrap()],
            total: Decimal::new(18999, 2),
            currency: "USD".to_string(),
            customer_name: "Test Customer".to_string(),
            customer_email: "test@example.com".to_string(),
            shipping_address: "123 Test Street".to_string(),
        }
    }

    fn service(store: &MemoryStore, ids: Arc<dyn IdGenerator>) -> OrderService {
        OrderService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(SystemClock),
            ids,
        )
    }

    #[tokio::test]
    async fn test_create_persists_pending_order() {
        let store = MemoryStore::new();
        let orders = service(&store, Arc::new(SequentialIds::default()));

        let order = orders.create(payload("s-1", "p-1")).await.unwrap();

        assert_eq!(order.id, OrderId::new(uuid::Uuid::from_u128(1)));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Decimal::new(18999, 2));
        assert_eq!(store.get_order(order.id).await.unwrap(), Some(order));
    }

    #[tokio::test]
    async fn test_create_generates_distinct_ids_and_current_timestamp() {
        let store = MemoryStore::new();
        let orders = service(&store, Arc::new(UuidGenerator));

        let before = Utc::now();
        let first = orders.create(payload("s-1", "p-1")).await.unwrap();
        let second = orders.create(payload("s-1", "p-1")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(first.created_at >= before);
    }

    #[tokio::test]
    async fn test_create_clears_cart_with_unrelated_items() {
        let store = MemoryStore::new();
        let orders = service(&store, Arc::new(SequentialIds::default()));
        let session = SessionId::new("s-unrelated");

        store
            .save_cart(&Cart::new(
                session.clone(),
                vec![CartItem::new("product-a", 3, None).unwrap()],
                Utc::now(),
            ))
            .await
            .unwrap();

        let order = orders
            .create(payload("s-unrelated", "product-b"))
            .await
            .unwrap();

        assert_eq!(order.items[0].product_id.as_str(), "product-b");
        assert!(store.get_cart(&session).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_without_cart_succeeds() {
        let store = MemoryStore::new();
        let orders = service(&store, Arc::new(SequentialIds::default()));

        orders.create(payload("no-cart", "p-1")).await.unwrap();
    }

    #[tokio::test]
    async fn test_total_is_not_recomputed() {
        let store = MemoryStore::new();
        let orders = service(&store, Arc::new(SequentialIds::default()));

        let mut submitted = payload("s-total", "p-1");
        submitted.total = Decimal::ONE;
        let order = orders.create(submitted).await.unwrap();

        assert_eq!(order.total, Decimal::ONE);
    }
}
