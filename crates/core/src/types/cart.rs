//! Carts and cart line items.
//!
//! A cart belongs to a session and holds line items keyed by
//! `(product_id, size)`. Items are validated when they are deserialized, so
//! the merge logic only ever sees well-formed quantities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ProductId, SessionId};
use super::product::Product;

/// Errors that can occur when building a [`CartItem`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartItemError {
    /// Quantity was zero or negative.
    #[error("quantity must be a positive integer (got {0})")]
    NonPositiveQuantity(i64),
    /// Quantity does not fit the supported range.
    #[error("quantity must be at most {max} (got {got})")]
    QuantityTooLarge {
        /// Largest accepted quantity.
        max: u32,
        /// The rejected value.
        got: i64,
    },
}

/// Unvalidated cart item as it arrives on the wire.
#[derive(Debug, Deserialize)]
struct CartItemPayload {
    product_id: ProductId,
    quantity: i64,
    #[serde(default)]
    size: Option<String>,
}

/// One line in a cart or order.
///
/// `product_id` is a reference into the catalog, not ownership: the product
/// may not exist. Two items are the same line when both `product_id` and
/// `size` match; an absent size never matches a present one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartItemPayload")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub size: Option<String>,
}

impl CartItem {
    /// Build a cart item, validating the quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if `quantity` is not positive or exceeds `u32::MAX`.
    pub fn new(
        product_id: impl Into<ProductId>,
        quantity: i64,
        size: Option<String>,
    ) -> Result<Self, CartItemError> {
        if quantity <= 0 {
            return Err(CartItemError::NonPositiveQuantity(quantity));
        }
        let quantity = u32::try_from(quantity).map_err(|_| CartItemError::QuantityTooLarge {
            max: u32::MAX,
            got: quantity,
        })?;

        Ok(Self {
            product_id: product_id.into(),
            quantity,
            size,
        })
    }

    /// Whether `other` refers to the same `(product_id, size)` line.
    #[must_use]
    pub fn same_line(&self, other: &Self) -> bool {
        self.product_id == other.product_id && self.size == other.size
    }
}

impl TryFrom<CartItemPayload> for CartItem {
    type Error = CartItemError;

    fn try_from(payload: CartItemPayload) -> Result<Self, Self::Error> {
        Self::new(payload.product_id, payload.quantity, payload.size)
    }
}

/// A session's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub session_id: SessionId,
    pub items: Vec<CartItem>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create a cart holding the given items as-is.
    #[must_use]
    pub const fn new(session_id: SessionId, items: Vec<CartItem>, now: DateTime<Utc>) -> Self {
        Self {
            session_id,
            items,
            updated_at: now,
        }
    }

    /// Merge one item into the cart.
    ///
    /// If a line with the same `(product_id, size)` exists its quantity grows
    /// by `item.quantity` (saturating at `u32::MAX`); otherwise the item is
    /// appended. There is no stock check.
    pub fn add_item(&mut self, item: CartItem, now: DateTime<Utc>) {
        match self.items.iter_mut().find(|existing| existing.same_line(&item)) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => self.items.push(item),
        }
        self.updated_at = now;
    }

    /// Overwrite every line with `items`. No merging or de-duplication.
    pub fn replace_items(&mut self, items: Vec<CartItem>, now: DateTime<Utc>) {
        self.items = items;
        self.updated_at = now;
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// A cart line joined with its catalog product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    pub product: Product,
}

/// Read-side cart: lines enriched with product details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub session_id: SessionId,
    pub items: Vec<CartLine>,
}

impl CartView {
    /// An empty cart for a session with nothing stored.
    #[must_use]
    pub const fn empty(session_id: SessionId) -> Self {
        Self {
            session_id,
            items: Vec::new(),
        }
    }
}
