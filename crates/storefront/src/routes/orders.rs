//! Order route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use odyssey_core::{Order, OrderCreate};

use crate::error::{Result, add_breadcrumb};
use crate::middleware::ValidJson;
use crate::state::AppState;

/// `POST /api/orders`
#[instrument(skip(state, payload), fields(session_id = %payload.session_id))]
pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<OrderCreate>,
) -> Result<Json<Order>> {
    add_breadcrumb(
        "checkout",
        "Order submitted",
        Some(&[("session_id", payload.session_id.as_str())]),
    );
    let order = state.orders().create(payload).await?;
    Ok(Json(order))
}
