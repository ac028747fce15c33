use axum::{
    body::Body,
    extract::Request,
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::env;

/// Identity of the authenticated admin, made available to handlers.
#[derive(Debug, Clone)]
pub struct AdminUser(pub String);

/// Admin bearer token authentication middleware. Requests that fail the
/// check never reach handler logic.
pub async fn admin_auth_middleware(mut request: Request, next: Next) -> Response {
    // Health endpoint is open
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    // Get expected token from environment
    let expected_token = match env::var("ARTIFACT_API_ADMIN_TOKEN") {
        Ok(token) => token,
        Err(_) => {
            tracing::error!("ARTIFACT_API_ADMIN_TOKEN not configured");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "server_misconfigured",
                    "message": "Admin API token not configured"
                })),
            )
                .into_response();
        }
    };

    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_header {
        Some(header) => {
            let parts: Vec<&str> = header.splitn(2, ' ').collect();
            if parts.len() != 2 || parts[0] != "Bearer" {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "error": "invalid_auth_format",
                        "message": "Authorization header must be 'Bearer <token>'"
                    })),
                )
                    .into_response();
            }

            if parts[1] != expected_token {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "error": "invalid_token",
                        "message": "Invalid or expired token"
                    })),
                )
                    .into_response();
            }

            // Single-admin token model; the identity travels with the request
            // so handlers can record who performed a change.
            request.extensions_mut().insert(AdminUser("admin".to_string()));
            next.run(request).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "missing_auth",
                "message": "Authorization header required"
            })),
        )
            .into_response(),
    }
}
