//! Server listener and backend selection.
//!
//! # Environment Variables
//!
//! - `SERVER_HOST`: Default `0.0.0.0`
//! - `SERVER_PORT`: Default 3000
//! - `METRICS_PORT`: Prometheus exporter port. Default 9090
//! - `STORE_BACKEND`: `postgres` (default) or `memory`

use std::env;
use std::str::FromStr;

/// Which store implementation backs the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
    pub store_backend: StoreBackend,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: crate::env_parse("SERVER_PORT", 3000),
            metrics_port: crate::env_parse("METRICS_PORT", 9090),
            store_backend: crate::env_parse("STORE_BACKEND", StoreBackend::Postgres),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
