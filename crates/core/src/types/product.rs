//! Catalog products.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::status::{Category, Condition};

/// An immutable catalog entry.
///
/// Products are created at seed time and never mutated by cart or order
/// operations. Prices are decimal internally and travel as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: Category,
    pub image_url: String,
    pub brand: String,
    pub condition: Condition,
    /// Ordered size labels, for products that come in sizes.
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
    pub stock: i32,
}

/// Filters for listing products. Both filters intersect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub condition: Option<Condition>,
}

impl ProductFilter {
    /// Whether `product` passes every set filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.is_none_or(|c| c == product.category)
            && self.condition.is_none_or(|c| c == product.condition)
    }
}
