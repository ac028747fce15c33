pub use pool::DbPool;
pub use stores::{CreateError, StoreRepository, DUPLICATE_ID_MESSAGE};

mod pool;
mod stores;

pub type Database = DbPool;

pub async fn init_db(db_path: &str) -> Result<Database, sqlx::Error> {
    let db = Database::new(db_path).await?;

    pool::run_migrations(&db).await?;

    Ok(db)
}
