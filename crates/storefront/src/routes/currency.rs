//! Currency rate handler.

use std::collections::BTreeMap;

use axum::Json;

use odyssey_core::{CurrencyCode, fallback_rates};

/// `GET /api/currency/rates`
///
/// Always the static table; there is no live rate source.
pub async fn rates() -> Json<BTreeMap<CurrencyCode, f64>> {
    Json(fallback_rates())
}
