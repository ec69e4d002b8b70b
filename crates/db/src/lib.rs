//! Persistence for Vuement components.
//!
//! - [`repositories::PgComponentStore`] keeps component documents as JSONB
//!   in PostgreSQL.
//! - [`memory::MemoryComponentStore`] keeps them in process, for local runs
//!   and tests.

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod repositories;

pub use memory::MemoryComponentStore;
pub use repositories::PgComponentStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
