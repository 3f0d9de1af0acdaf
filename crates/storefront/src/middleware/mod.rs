//! HTTP middleware stack for the storefront API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, one transaction per request)
//! 2. CORS (answer preflights before anything else runs)
//! 3. `TraceLayer` (request span with method, path and request id)
//! 4. Request ID (record the id on the span and echo it back)
//!
//! `ValidJson` is an extractor rather than a layer; it turns body rejections
//! into the API's `{"detail": ...}` error shape.

pub mod cors;
pub mod json;
pub mod request_id;

pub use cors::cors_layer;
pub use json::ValidJson;
pub use request_id::{REQUEST_ID_HEADER, make_request_span, record_response, request_id_middleware};
