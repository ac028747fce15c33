use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};

use crate::db::{CreateError, DUPLICATE_ID_MESSAGE};
use crate::etag::etag_for;
use crate::middleware::AdminUser;
use crate::models::{ArtifactStore, CreateStoreRequest, StoresResponse};
use crate::AppState;

pub fn routes() -> axum::Router<AppState> {
    axum::Router::new().route("/", axum::routing::get(index).post(create))
}

/// GET /api/admin/artifact_stores
/// List all configured artifact stores
async fn index(State(state): State<AppState>) -> impl IntoResponse {
    match state.stores.list().await {
        Ok(artifact_stores) => Ok(Json(StoresResponse { artifact_stores })),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": "database_error",
                "message": e.to_string()
            })),
        )),
    }
}

/// POST /api/admin/artifact_stores
/// Create a new artifact store
async fn create(
    State(state): State<AppState>,
    Extension(AdminUser(username)): Extension<AdminUser>,
    Json(body): Json<CreateStoreRequest>,
) -> impl IntoResponse {
    let mut candidate = ArtifactStore::from(body);

    // Best-effort pre-check so an obvious duplicate never reaches the write
    // path. The insert's PRIMARY KEY still catches a racing create.
    match state.stores.find(&candidate.id).await {
        Ok(Some(_)) => {
            candidate.add_error("id", DUPLICATE_ID_MESSAGE);
            return Err(conflict_response(candidate));
        }
        Ok(None) => {}
        Err(e) => {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "database_error",
                    "message": e.to_string()
                })),
            ));
        }
    }

    match state.stores.create(candidate, &username).await {
        Ok(store) => {
            let etag = etag_for(&store);
            Ok((
                StatusCode::CREATED,
                [(header::ETAG, etag)],
                Json(store),
            ))
        }
        Err(CreateError::Invalid(store)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "error": "invalid_artifact_store",
                "message": "There are errors in the artifact store definition",
                "store": store
            })),
        )),
        Err(CreateError::Conflict(store)) => Err(conflict_response(store)),
        Err(CreateError::Database(e)) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": "database_error",
                "message": e.to_string()
            })),
        )),
    }
}

/// Conflict body carries the rejected candidate with its field errors so the
/// caller can see exactly which field collided.
fn conflict_response(store: ArtifactStore) -> (StatusCode, Json<serde_json::Value>) {
    let message = format!("Failed to add artifact store '{}'. {}", store.id, DUPLICATE_ID_MESSAGE);
    (
        StatusCode::CONFLICT,
        Json(serde_json::json!({
            "error": "store_already_exists",
            "message": message,
            "store": store
        })),
    )
}
