//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness check
//! GET    /health/ready              - Readiness check (storage ping)
//!
//! GET    /api/                      - API banner
//!
//! # Products
//! GET    /api/products              - Product listing (?category=&condition=)
//! GET    /api/products/{id}         - Product detail
//!
//! # Cart
//! POST   /api/cart/{session_id}     - Add (merge) one item
//! GET    /api/cart/{session_id}     - Cart with product details
//! PUT    /api/cart/{session_id}     - Replace all items
//! DELETE /api/cart/{session_id}     - Clear
//!
//! # Orders
//! POST   /api/orders                - Place an order
//!
//! # Currency
//! GET    /api/currency/rates        - Static conversion table
//! ```

pub mod cart;
pub mod currency;
pub mod orders;
pub mod products;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::middleware::{cors_layer, make_request_span, record_response, request_id_middleware};
use crate::state::AppState;

/// Acknowledgement body returned by mutating cart endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: &'static str,
}

impl Message {
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{product_id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new().route(
        "/{session_id}",
        get(cart::show)
            .post(cart::add)
            .put(cart::replace)
            .delete(cart::clear),
    )
}

/// Create all `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/orders", post(orders::create))
        .route("/currency/rates", get(currency::rates))
}

/// Build the full application: health checks, the API and the request
/// middleware (request id, tracing, CORS). Sentry layers are added by the
/// binary.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config().cors_origins);

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/api", get(banner))
        .route("/api/", get(banner))
        .nest("/api", api_routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(record_response),
        )
        .layer(cors)
        .with_state(state)
}

/// `GET /api/`
async fn banner() -> Json<Message> {
    Json(Message::new("Odyssey Finds API"))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if storage is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.storage().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Method, Request},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::db::{MemoryStore, Storage};
    use crate::services::seed::{SeedCatalog, seed_if_empty};
    use crate::services::testing::{SequentialIds, SteppingClock};

    async fn test_app() -> Router {
        let store = MemoryStore::new();
        seed_if_empty(&store, &SeedCatalog::sample().unwrap())
            .await
            .unwrap();

        let config = StorefrontConfig::from_lookup(|key| {
            (key == "STOREFRONT_STORAGE").then(|| "memory".to_string())
        })
        .unwrap();

        let state = AppState::with_clock(
            config,
            Storage::in_memory(store),
            Arc::new(SteppingClock::starting_at(1_700_000_000)),
            Arc::new(SequentialIds::default()),
        );
        app(state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn first_product_id(app: &Router, query: &str) -> String {
        let response = send(app, Method::GET, &format!("/api/products{query}"), None).await;
        json_body(response).await[0]["id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_banner_with_and_without_slash() {
        let app = test_app().await;

        for uri in ["/api", "/api/"] {
            let response = send(&app, Method::GET, uri, None).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                json_body(response).await,
                json!({"message": "Odyssey Finds API"})
            );
        }
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = test_app().await;

        assert_eq!(send(&app, Method::GET, "/health", None).await.status(), StatusCode::OK);
        assert_eq!(
            send(&app, Method::GET, "/health/ready", None).await.status(),
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_list_products_and_filters() {
        let app = test_app().await;

        let all = json_body(send(&app, Method::GET, "/api/products", None).await).await;
        assert_eq!(all.as_array().unwrap().len(), 8);
        assert!(all[0]["price"].is_number());

        let sneakers =
            json_body(send(&app, Method::GET, "/api/products?category=sneakers", None).await).await;
        assert_eq!(sneakers.as_array().unwrap().len(), 4);
        assert!(sneakers.as_array().unwrap().iter().all(|p| p["category"] == "sneakers"));

        let used_phones = json_body(
            send(&app, Method::GET, "/api/products?category=phones&condition=used", None).await,
        )
        .await;
        assert_eq!(used_phones.as_array().unwrap().len(), 4);

        let new_phones = json_body(
            send(&app, Method::GET, "/api/products?category=phones&condition=new", None).await,
        )
        .await;
        assert!(new_phones.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_category_is_empty_not_error() {
        let app = test_app().await;

        let response = send(&app, Method::GET, "/api/products?category=watches", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_empty_filter_values_do_not_filter() {
        let app = test_app().await;

        for (uri, expected) in [
            ("/api/products?category=", 8),
            ("/api/products?condition=", 8),
            ("/api/products?category=&condition=used", 4),
        ] {
            let response = send(&app, Method::GET, uri, None).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(json_body(response).await.as_array().unwrap().len(), expected, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_get_product() {
        let app = test_app().await;
        let id = first_product_id(&app, "").await;

        let response = send(&app, Method::GET, &format!("/api/products/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["id"], id.as_str());

        let missing = send(&app, Method::GET, "/api/products/invalid-id", None).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(missing).await["detail"], "Product not found");
    }

    #[tokio::test]
    async fn test_cart_lifecycle() {
        let app = test_app().await;
        let id = first_product_id(&app, "?category=sneakers").await;
        let cart = "/api/cart/session-lifecycle";

        let response = send(
            &app,
            Method::POST,
            cart,
            Some(json!({"product_id": id, "quantity": 2, "size": "10"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"message": "Item added to cart"}));

        send(
            &app,
            Method::POST,
            cart,
            Some(json!({"product_id": id, "quantity": 3, "size": "10"})),
        )
        .await;

        let body = json_body(send(&app, Method::GET, cart, None).await).await;
        assert_eq!(body["session_id"], "session-lifecycle");
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["quantity"], 5);
        assert_eq!(body["items"][0]["size"], "10");
        assert_eq!(body["items"][0]["product"]["id"], id.as_str());

        let response = send(
            &app,
            Method::PUT,
            cart,
            Some(json!([{"product_id": id, "quantity": 1, "size": "9"}])),
        )
        .await;
        assert_eq!(json_body(response).await, json!({"message": "Cart updated"}));
        let body = json_body(send(&app, Method::GET, cart, None).await).await;
        assert_eq!(body["items"][0]["quantity"], 1);
        assert_eq!(body["items"][0]["size"], "9");

        let response = send(&app, Method::DELETE, cart, None).await;
        assert_eq!(json_body(response).await, json!({"message": "Cart cleared"}));
        let body = json_body(send(&app, Method::GET, cart, None).await).await;
        assert_eq!(body["items"], json!([]));
    }

    #[tokio::test]
    async fn test_empty_cart_for_unknown_session() {
        let app = test_app().await;

        let response = send(&app, Method::GET, "/api/cart/nobody", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"session_id": "nobody", "items": []})
        );
    }

    #[tokio::test]
    async fn test_invalid_cart_items_are_422() {
        let app = test_app().await;

        for body in [
            json!({"product_id": "p", "quantity": 0}),
            json!({"product_id": "p", "quantity": -1}),
            json!({"product_id": "p"}),
            json!({"quantity": 1}),
        ] {
            let response = send(&app, Method::POST, "/api/cart/s-invalid", Some(body)).await;
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            assert!(json_body(response).await["detail"].is_string());
        }
    }

    #[tokio::test]
    async fn test_create_order_clears_cart() {
        let app = test_app().await;
        let id = first_product_id(&app, "?category=phones").await;

        send(
            &app,
            Method::POST,
            "/api/cart/s-order",
            Some(json!({"product_id": "something-else", "quantity": 1})),
        )
        .await;

        let response = send(
            &app,
            Method::POST,
            "/api/orders",
            Some(json!({
                "id": "client-chosen",
                "session_id": "s-order",
                "items": [{"product_id": id, "quantity": 1, "size": null}],
                "total": 599.99,
                "currency": "EUR",
                "customer_name": "Test Customer",
                "customer_email": "test@example.com",
                "shipping_address": "123 Test Street"
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let order = json_body(response).await;
        assert_eq!(order["id"], "00000000-0000-0000-0000-000000000001");
        assert_eq!(order["status"], "pending");
        assert_eq!(order["total"], json!(599.99));
        assert_eq!(order["currency"], "EUR");
        assert_eq!(order["created_at"], "2023-11-14T22:13:21Z");

        let cart = json_body(send(&app, Method::GET, "/api/cart/s-order", None).await).await;
        assert_eq!(cart["items"], json!([]));
    }

    #[tokio::test]
    async fn test_order_missing_field_is_422() {
        let app = test_app().await;

        let response = send(
            &app,
            Method::POST,
            "/api/orders",
            Some(json!({
                "session_id": "s",
                "items": [],
                "total": 1.0,
                "currency": "USD",
                "customer_name": "A",
                "customer_email": "a@example.com"
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_currency_rates() {
        let app = test_app().await;

        let response = send(&app, Method::GET, "/api/currency/rates", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"USD": 1.0, "EUR": 0.92, "GBP": 0.79, "JPY": 149.5, "ZAR": 18.5})
        );
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let app = test_app().await;

        let response = send(&app, Method::GET, "/api/", None).await;
        assert!(response.headers().contains_key("x-request-id"));
    }
}
