//! Cart service.
//!
//! Carts are read-modify-write documents. `add_item` loads the cart, merges
//! the incoming line and writes the whole item list back. The two storage
//! calls are not isolated, so concurrent adds to one session can lose an
//! update.

use std::sync::Arc;

use tracing::instrument;

use odyssey_core::{Cart, CartItem, CartLine, CartView, SessionId};

use super::Clock;
use crate::db::{CartStore, CatalogStore, RepositoryError};

/// Per-session cart operations.
#[derive(Clone)]
pub struct CartService {
    carts: Arc<dyn CartStore>,
    catalog: Arc<dyn CatalogStore>,
    clock: Arc<dyn Clock>,
}

impl CartService {
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartStore>,
        catalog: Arc<dyn CatalogStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            carts,
            catalog,
            clock,
        }
    }

    /// Merge one item into the session's cart, creating the cart if needed.
    ///
    /// The product id is not checked against the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or written.
    #[instrument(skip(self, item), fields(product_id = %item.product_id, quantity = item.quantity))]
    pub async fn add_item(
        &self,
        session_id: &SessionId,
        item: CartItem,
    ) -> Result<(), RepositoryError> {
        let now = self.clock.now();

        let cart = match self.carts.get_cart(session_id).await? {
            Some(mut cart) => {
                cart.add_item(item, now);
                cart
            }
            None => Cart::new(session_id.clone(), vec![item], now),
        };

        self.carts.save_cart(&cart).await?;
        tracing::debug!(
            lines = cart.items.len(),
            units = cart.total_quantity(),
            "Cart saved"
        );
        Ok(())
    }

    /// Read the cart with product details joined in.
    ///
    /// A missing cart reads as empty. Lines whose product is no longer in the
    /// catalog are left out of the result; the stored cart is not touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart or catalog cannot be read.
    #[instrument(skip(self))]
    pub async fn get(&self, session_id: &SessionId) -> Result<CartView, RepositoryError> {
        let Some(cart) = self.carts.get_cart(session_id).await? else {
            return Ok(CartView::empty(session_id.clone()));
        };

        let mut lines = Vec::with_capacity(cart.items.len());
        for item in cart.items {
            match self.catalog.get_product(&item.product_id).await? {
                Some(product) => lines.push(CartLine { item, product }),
                None => {
                    tracing::debug!(product_id = %item.product_id, "Dropping cart line for unknown product");
                }
            }
        }

        Ok(CartView {
            session_id: cart.session_id,
            items: lines,
        })
    }

    /// Replace the session's items wholesale, creating the cart if needed.
    ///
    /// No merging or de-duplication is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub async fn replace(
        &self,
        session_id: &SessionId,
        items: Vec<CartItem>,
    ) -> Result<(), RepositoryError> {
        let cart = Cart::new(session_id.clone(), items, self.clock.now());
        self.carts.save_cart(&cart).await
    }

    /// Delete the session's cart. Clearing a missing cart succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    #[instrument(skip(self))]
    pub async fn clear(&self, session_id: &SessionId) -> Result<(), RepositoryError> {
        let existed = self.carts.delete_cart(session_id).await?;
        tracing::debug!(existed, "Cart cleared");
        Ok(())
    }
}
