//! Database connection settings.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string
//! - `DATABASE_MAX_CONNECTIONS`: Pool size. Default 10
//! - `DATABASE_RUN_MIGRATIONS`: Apply embedded migrations on startup. Default `true`

use std::env;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            max_connections: crate::env_parse("DATABASE_MAX_CONNECTIONS", 10),
            run_migrations: crate::env_flag("DATABASE_RUN_MIGRATIONS", true),
        }
    }
}
