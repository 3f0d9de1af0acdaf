//! JSON body extractor with API-shaped rejections.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Like `axum::Json`, but a body that is missing, malformed or fails
/// validation is rejected with a 422 `{"detail": ...}` response.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(validation_error(&rejection)),
        }
    }
}

fn validation_error(rejection: &JsonRejection) -> AppError {
    tracing::debug!(status = %rejection.status(), "Rejected request body");
    AppError::Validation(rejection.body_text())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Deserialize)]
    struct Payload {
        quantity: u32,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|ValidJson(payload): ValidJson<Payload>| async move {
                payload.quantity.to_string()
            }),
        )
    }

    fn request(content_type: &str, body: &'static str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap()
    }

    async fn detail(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["detail"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let response = app()
            .oneshot(request("application/json", r#"{"quantity": 3}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_field_is_422_with_detail() {
        let response = app()
            .oneshot(request("application/json", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(detail(response).await.contains("quantity"));
    }

    #[tokio::test]
    async fn test_syntax_error_is_422() {
        let response = app()
            .oneshot(request("application/json", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_422() {
        let response = app()
            .oneshot(request("text/plain", r#"{"quantity": 3}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
