//! Database connection pool.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::settings::Database;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a connection pool for the configured database.
pub async fn connect(settings: &Database) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.url)
        .await
}

/// Bring the `users` schema up to date.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
