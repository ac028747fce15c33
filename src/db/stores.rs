use crate::models::{ArtifactStore, StoreProperty};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Field error attached to `id` when a create collides with an existing store.
pub const DUPLICATE_ID_MESSAGE: &str =
    "Artifact store ids should be unique. Artifact store with the same id exists.";

pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch the full collection, ordered by id for deterministic listings.
    pub async fn list(&self) -> Result<Vec<ArtifactStore>, sqlx::Error> {
        let rows = sqlx::query_as::<_, StoreRow>(
            "SELECT id, plugin_id, properties, created_at FROM artifact_stores ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_store()).collect())
    }

    /// Look up a store by id.
    pub async fn find(&self, id: &str) -> Result<Option<ArtifactStore>, sqlx::Error> {
        let row = sqlx::query_as::<_, StoreRow>(
            "SELECT id, plugin_id, properties, created_at FROM artifact_stores WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_store()))
    }

    /// Validate and insert a new store. The caller's identity is recorded in
    /// the audit log. The table's PRIMARY KEY is the authoritative uniqueness
    /// check; a racing insert against the same id surfaces as `Conflict`.
    pub async fn create(
        &self,
        store: ArtifactStore,
        username: &str,
    ) -> Result<ArtifactStore, CreateError> {
        let mut candidate = store;
        validate(&mut candidate);
        if candidate.has_errors() {
            warn!(id = %candidate.id, "Rejected invalid artifact store");
            return Err(CreateError::Invalid(candidate));
        }

        let properties = serde_json::to_string(&candidate.properties)
            .map_err(|e| CreateError::Database(sqlx::Error::Decode(Box::new(e))))?;

        let result = sqlx::query(
            "INSERT INTO artifact_stores (id, plugin_id, properties, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&candidate.id)
        .bind(&candidate.plugin_id)
        .bind(&properties)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                info!(id = %candidate.id, plugin_id = %candidate.plugin_id, user = %username,
                    "Created artifact store");
                Ok(candidate)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                candidate.add_error("id", DUPLICATE_ID_MESSAGE);
                Err(CreateError::Conflict(candidate))
            }
            Err(e) => Err(CreateError::Database(e)),
        }
    }
}

fn validate(store: &mut ArtifactStore) {
    if store.id.is_empty() {
        store.add_error("id", "Artifact store id cannot be blank.");
    } else if !store
        .id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        store.add_error(
            "id",
            "Artifact store id may only contain letters, digits, hyphens and underscores.",
        );
    }
    if store.plugin_id.is_empty() {
        store.add_error("pluginId", "Artifact store plugin id cannot be blank.");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("There are errors in the artifact store definition")]
    Invalid(ArtifactStore),
    #[error("{DUPLICATE_ID_MESSAGE}")]
    Conflict(ArtifactStore),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Raw database row for artifact stores
#[derive(sqlx::FromRow)]
struct StoreRow {
    id: String,
    plugin_id: String,
    properties: String,
    #[allow(dead_code)]
    created_at: String,
}

impl StoreRow {
    fn into_store(self) -> ArtifactStore {
        let properties: Vec<StoreProperty> = match serde_json::from_str(&self.properties) {
            Ok(properties) => properties,
            Err(e) => {
                warn!(id = %self.id, "Dropping unparseable stored properties: {}", e);
                Vec::new()
            }
        };
        let mut store = ArtifactStore::new(self.id, self.plugin_id);
        store.properties = properties;
        store
    }
}
