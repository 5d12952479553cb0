use std::sync::Arc;

use classbook_config::{CorsConfig, JwtConfig, RateLimitConfig};

use crate::store::{ClassroomStore, InMemoryStore, PgStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ClassroomStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn ClassroomStore>) -> Self {
        Self {
            store,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            rate_limit_config: RateLimitConfig::from_env(),
        }
    }

    pub fn with_postgres(pool: classbook_db::PgPool) -> Self {
        Self::new(Arc::new(PgStore::new(pool)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &"<redacted>")
            .field("cors_config", &self.cors_config)
            .field("rate_limit_config", &self.rate_limit_config)
            .finish_non_exhaustive()
    }
}
