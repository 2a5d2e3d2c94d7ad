//! Fireside persistence layer.
//!
//! Pool helpers plus the models and repositories for the save store. SQL
//! migrations live at the workspace level in `db/migrations/` and are applied
//! by [`run_migrations`] at startup (and by `#[sqlx::test]` in tests).

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Cheap liveness probe against the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

/// Apply any pending workspace migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::debug!("Applying workspace migrations");
    sqlx::migrate!("../../db/migrations").run(pool).await
}
