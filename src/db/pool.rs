use sqlx::SqlitePool;
use tracing::info;

#[derive(Clone)]
pub struct DbPool(SqlitePool);

impl DbPool {
    pub async fn new(db_path: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path)).await?;
        Ok(Self(pool))
    }

    pub fn inner(&self) -> &SqlitePool {
        &self.0
    }
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    info!("Running database migrations");

    // The PRIMARY KEY on id is the authoritative uniqueness guarantee for
    // artifact store ids; handler-level duplicate checks are best-effort.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artifact_stores (
            id TEXT PRIMARY KEY,
            plugin_id TEXT NOT NULL,
            properties TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        )
    "#,
    )
    .execute(pool.inner())
    .await?;

    info!("Database migrations completed");
    Ok(())
}
