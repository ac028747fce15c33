use axum::{
    extract::Request,
    http::{header::ACCEPT, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Vendor mime type for version 1 of the admin API.
pub const V1_MIME: &str = "application/vnd.artifact-api.v1+json";

/// Routes are versioned through the Accept header. A missing header, a
/// wildcard, or plain JSON is treated as v1; any other explicit value is
/// rejected so an unsupported client version fails loudly rather than
/// getting a shape it cannot parse.
pub async fn require_v1(request: Request, next: Next) -> Response {
    let accept = request
        .headers()
        .get(ACCEPT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("*/*");

    let accepted = accept
        .split(',')
        .map(|part| part.split(';').next().unwrap_or("").trim())
        .any(|mime| matches!(mime, "*/*" | "application/*" | "application/json") || mime == V1_MIME);

    if !accepted {
        return (
            StatusCode::NOT_ACCEPTABLE,
            Json(serde_json::json!({
                "error": "unsupported_api_version",
                "message": format!("This endpoint only supports {}", V1_MIME)
            })),
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn setup_test_app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(require_v1))
    }

    async fn status_for(accept: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().method(Method::GET).uri("/");
        if let Some(value) = accept {
            builder = builder.header(ACCEPT, value);
        }
        let response = setup_test_app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_missing_accept_is_v1() {
        assert_eq!(status_for(None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wildcard_accept_passes() {
        assert_eq!(status_for(Some("*/*")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_application_wildcard_passes() {
        assert_eq!(status_for(Some("application/*")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_v1_mime_passes() {
        assert_eq!(status_for(Some(V1_MIME)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_v1_mime_with_params_passes() {
        let accept = format!("{}; charset=utf-8", V1_MIME);
        assert_eq!(status_for(Some(&accept)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_version_rejected() {
        assert_eq!(
            status_for(Some("application/vnd.artifact-api.v9+json")).await,
            StatusCode::NOT_ACCEPTABLE
        );
    }

    #[tokio::test]
    async fn test_non_json_rejected() {
        assert_eq!(status_for(Some("text/html")).await, StatusCode::NOT_ACCEPTABLE);
    }
}
