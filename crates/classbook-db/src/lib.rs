//! # Classbook DB
//!
//! Database pool and schema migrations for the Classbook API.
//!
//! The schema lives in the workspace `migrations/` directory and is embedded
//! into the binary with [`sqlx::migrate!`].
//!
//! # Example
//!
//! ```ignore
//! use classbook_config::DatabaseConfig;
//! use classbook_db::{init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env();
//! let url = config.url.as_deref().expect("DATABASE_URL must be set");
//! let pool = init_db_pool(url, config.max_connections).await?;
//! run_migrations(&pool).await?;
//! ```

use classbook_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a PostgreSQL connection pool.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!(max_connections, "Database pool initialized");
    Ok(pool)
}

/// Applies any pending embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Opens a pool from configuration and applies migrations when enabled.
///
/// Returns `Ok(None)` when no `DATABASE_URL` is configured.
pub async fn connect(config: &DatabaseConfig) -> Result<Option<PgPool>, MigrateError> {
    let Some(url) = config.url.as_deref() else {
        return Ok(None);
    };

    let pool = init_db_pool(url, config.max_connections).await?;
    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    Ok(Some(pool))
}
