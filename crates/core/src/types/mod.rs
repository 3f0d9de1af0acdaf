//! Domain types for Odyssey Finds.

pub mod cart;
pub mod currency;
pub mod id;
pub mod order;
pub mod product;
pub mod status;

pub use cart::{Cart, CartItem, CartItemError, CartLine, CartView};
pub use currency::{CurrencyCode, fallback_rates};
pub use id::*;
pub use order::{Order, OrderCreate};
pub use product::{Product, ProductFilter};
pub use status::*;
