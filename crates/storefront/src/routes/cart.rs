//! Cart route handlers.
//!
//! Carts are keyed by an opaque session id chosen by the client.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use odyssey_core::{CartItem, CartView, SessionId};

use super::Message;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::ValidJson;
use crate::state::AppState;

/// `POST /api/cart/{session_id}`
#[instrument(skip(state, item), fields(product_id = %item.product_id))]
pub async fn add(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
    ValidJson(item): ValidJson<CartItem>,
) -> Result<Json<Message>> {
    add_breadcrumb(
        "cart",
        "Item added",
        Some(&[
            ("session_id", session_id.as_str()),
            ("product_id", item.product_id.as_str()),
        ]),
    );
    state.carts().add_item(&session_id, item).await?;
    Ok(Json(Message::new("Item added to cart")))
}

/// `GET /api/cart/{session_id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<CartView>> {
    Ok(Json(state.carts().get(&session_id).await?))
}

/// `PUT /api/cart/{session_id}`
#[instrument(skip(state, items), fields(lines = items.len()))]
pub async fn replace(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
    ValidJson(items): ValidJson<Vec<CartItem>>,
) -> Result<Json<Message>> {
    state.carts().replace(&session_id, items).await?;
    Ok(Json(Message::new("Cart updated")))
}

/// `DELETE /api/cart/{session_id}`
#[instrument(skip(state))]
pub async fn clear(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<Message>> {
    state.carts().clear(&session_id).await?;
    Ok(Json(Message::new("Cart cleared")))
}
