use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{info, warn};

use classbook::logging::{init_tracing, shutdown_tracer};
use classbook::metrics::{init_metrics, metrics_app};
use classbook::router::init_router;
use classbook::state::AppState;
use classbook_config::{DatabaseConfig, ServerConfig, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();

    let state = match server_config.store_backend {
        StoreBackend::Postgres => {
            let pool = classbook_db::connect(&DatabaseConfig::from_env())
                .await
                .context("Failed to initialize database")?
                .context("DATABASE_URL must be set when STORE_BACKEND=postgres")?;
            AppState::with_postgres(pool)
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; data is lost on shutdown");
            AppState::in_memory()
        }
    };

    if let Some(handle) = init_metrics() {
        let metrics_addr = format!("{}:{}", server_config.host, server_config.metrics_port);
        let metrics_listener = TcpListener::bind(&metrics_addr)
            .await
            .with_context(|| format!("Failed to bind metrics listener on {metrics_addr}"))?;
        info!("📈 Metrics available at http://{metrics_addr}/metrics");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(metrics_listener, metrics_app(handle)).await {
                tracing::error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let app = init_router(state);

    let addr = server_config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("🚀 Server running on http://{addr}");
    info!("📚 Swagger UI available at http://{addr}/swagger-ui");
    info!("📖 Scalar UI available at http://{addr}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
