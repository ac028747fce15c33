use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod db;
mod etag;
mod middleware;
mod models;
mod stores;

use db::StoreRepository;

#[derive(Clone)]
pub struct AppState {
    stores: Arc<StoreRepository>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artifact_config_api=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_path =
        std::env::var("ARTIFACT_API_DB").unwrap_or_else(|_| "artifact_stores.db".to_string());
    let db = db::init_db(&db_path).await?;
    info!("Database initialized at {}", db_path);

    let state = AppState {
        stores: Arc::new(StoreRepository::new(db.inner().clone())),
    };

    // Auth runs outermost so an unauthenticated caller gets a 401 before any
    // version negotiation happens.
    let admin_routes = stores::routes()
        .layer(axum::middleware::from_fn(middleware::require_v1))
        .layer(axum::middleware::from_fn(middleware::admin_auth_middleware));

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/admin/artifact_stores", admin_routes)
        .with_state(state);

    let addr: SocketAddr = std::env::var("ARTIFACT_API_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8153".to_string())
        .parse()?;
    info!("listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
