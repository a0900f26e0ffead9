use std::net::SocketAddr;

use anyhow::Context;
use labkeeper::api;
use labkeeper::app::{PgAppServices, build_router, connect_pool, run_migrations};
use labkeeper::config::AppConfig;
use labkeeper::handler::logging::init_logging;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    init_logging(config.log_level);
    api::health::init_health_check();

    if config.uses_development_jwt_secret() {
        tracing::warn!("JWT_SECRET is not set; using the development secret");
    }

    let pool = connect_pool(&config.database)
        .await
        .context("failed to connect to the database")?;
    run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    let services = PgAppServices::from_pool(&pool, &config);
    let app = build_router(services, pool, &config)?;

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    let local_addr = listener.local_addr()?;

    tracing::info!("🖥️ labkeeper server listening on http://{}", local_addr);
    tracing::info!("📊 Health check: http://{}/health", local_addr);
    tracing::info!("  • Auth: /api/auth/login, /api/auth/verify, /api/auth/me");
    tracing::info!("  • Inventory: /api/computers, /api/computers/{{id}}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
