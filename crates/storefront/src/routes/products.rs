//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use odyssey_core::{Category, Condition, Product, ProductFilter, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the product listing.
///
/// Values are kept as raw strings so an unknown category or condition can
/// match nothing instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub condition: Option<String>,
}

impl ProductQuery {
    /// Resolve into a typed filter. Empty values do not filter. `None` if a
    /// value names no known variant.
    fn to_filter(&self) -> Option<ProductFilter> {
        let category = match self.category.as_deref().filter(|raw| !raw.is_empty()) {
            None => None,
            Some(raw) => Some(raw.parse::<Category>().ok()?),
        };
        let condition = match self.condition.as_deref().filter(|raw| !raw.is_empty()) {
            None => None,
            Some(raw) => Some(raw.parse::<Condition>().ok()?),
        };
        Some(ProductFilter {
            category,
            condition,
        })
    }
}

/// `GET /api/products`
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let Some(filter) = query.to_filter() else {
        tracing::debug!("Unknown filter value, returning no products");
        return Ok(Json(Vec::new()));
    };

    Ok(Json(state.catalog().list(filter).await?))
}

/// `GET /api/products/{product_id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .get(&product_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product".to_string()))
}
