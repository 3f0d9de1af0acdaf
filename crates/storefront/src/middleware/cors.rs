//! Cross-origin policy for browser clients.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

use crate::config::CorsOrigins;

/// Build the CORS layer for the configured origins.
///
/// A wildcard allows every origin, method and header without credentials.
/// An explicit list mirrors the requested method and headers and allows
/// credentials. Origins that are not valid header values are skipped with a
/// warning.
#[must_use]
pub fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsOrigins::List(list) => {
            let allowed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app(origins: &CorsOrigins) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(cors_layer(origins))
    }

    fn request_from(origin: &str) -> Request<Body> {
        Request::builder()
            .uri("/")
            .header("origin", origin)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_wildcard_allows_any_origin() {
        let response = app(&CorsOrigins::Any)
            .oneshot(request_from("https://anywhere.example"))
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_listed_origin_is_echoed_with_credentials() {
        let origins = CorsOrigins::List(vec!["https://shop.example".to_string()]);
        let response = app(&origins)
            .oneshot(request_from("https://shop.example"))
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "https://shop.example"
        );
        assert_eq!(
            headers.get("access-control-allow-credentials").unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_unlisted_origin_gets_no_allow_header() {
        let origins = CorsOrigins::List(vec!["https://shop.example".to_string()]);
        let response = app(&origins)
            .oneshot(request_from("https://evil.example"))
            .await
            .unwrap();

        assert!(response.headers().get("access-control-allow-origin").is_none());
    }
}
