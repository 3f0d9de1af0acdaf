//! Integration tests for the Odyssey Finds storefront API.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a server (in-memory storage needs no database)
//! STOREFRONT_STORAGE=memory cargo run -p odyssey-storefront
//!
//! # Run the ignored HTTP tests against it
//! cargo test -p odyssey-integration-tests -- --ignored
//! ```
//!
//! The tests expect the sample catalog to be seeded and use fresh session ids
//! so they can run against a shared server.

use reqwest::Client;
use uuid::Uuid;

/// Base URL for the storefront (configurable via `STOREFRONT_BASE_URL`).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// URL of an `/api` endpoint, `path` without a leading slash.
#[must_use]
pub fn api_url(path: &str) -> String {
    format!("{}/api/{path}", storefront_base_url())
}

/// A plain JSON client.
#[must_use]
pub fn client() -> Client {
    Client::new()
}

/// A session id no other test run will use.
#[must_use]
pub fn fresh_session_id() -> String {
    format!("test_session_{}", Uuid::new_v4().simple())
}
