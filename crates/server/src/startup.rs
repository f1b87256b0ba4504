use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::repo::SeaOrmStore;
use service::Store;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::errors::StartupError;
use crate::routes;
use crate::state::{ServerAuthConfig, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `.env`, logging and configuration, then serve until interrupted.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();
    let cfg = AppConfig::load_and_validate()?;
    run_with_config(cfg).await
}

/// Connect, migrate when enabled, and serve the router on `server.host:server.port`.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    if cfg.auth.jwt_secret.trim().is_empty() {
        return Err(StartupError::InvalidConfig("auth.jwt_secret is empty; set it in config.toml or JWT_SECRET".into()).into());
    }

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }

    let store: Arc<dyn Store> = Arc::new(SeaOrmStore::new(db));
    let state = ServerState::new(store, ServerAuthConfig::from(&cfg.auth));
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {}", e)))?;
    info!(%addr, "starting user service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
