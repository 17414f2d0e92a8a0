use axum::extract::FromRequest;

use crate::prelude::AppError;

/// `axum::Json` whose rejections come back as `AppError::Validation`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
        routing::post,
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Input {
        #[allow(dead_code)]
        job_id: i32,
    }

    async fn send(content_type: Option<&str>, body: &'static str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/", post(|JsonBody(_): JsonBody<Input>| async { "ok" }));
        let mut req = Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            req = req.header(CONTENT_TYPE, ct);
        }
        let res = app
            .oneshot(req.body(Body::from(body)).expect("request"))
            .await
            .expect("infallible");
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json error body"))
    }

    #[tokio::test]
    async fn test_mistyped_field_is_bad_request() {
        let (status, body) = send(Some("application/json"), r#"{"job_id":"abc"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "request body has a missing or mistyped field");
        assert!(!body.to_string().contains("i32"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, body) = send(Some("application/json"), "{job_id:").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "request body is not valid json");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let (status, body) = send(None, r#"{"job_id":1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "expected a json request body");
    }
}
