use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::app::{app, AppState};
use crate::auth;
use crate::config::AppConfig;
use crate::database::{CommentStore, DatabaseManager, MemoryCommentStore, PgCommentRepository};
use crate::services::CommentService;

pub async fn handle(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = port {
        config.server.port = port;
    }
    tracing::info!("Starting comments API in {:?} mode", config.environment);

    let store = open_store(&config).await?;
    let comments = CommentService::new(store)
        .with_timeout(Duration::from_millis(config.database.storage_timeout_ms));
    let authenticator = auth::from_config(&config.security)?;
    tracing::info!("Mutating routes protected by {} authentication", authenticator.name());

    let router = app(AppState::new(comments), authenticator, &config);

    let bind_addr = SocketAddr::new(config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn CommentStore>> {
    if config.database.url.is_none() {
        // validate() only lets this through where the fallback is allowed
        tracing::warn!("No database configured; comments are kept in memory and lost on restart");
        return Ok(Arc::new(MemoryCommentStore::new()));
    }

    let manager = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    manager.health_check().await.context("database health check failed")?;
    manager.migrate().await.context("failed to prepare comments table")?;
    tracing::info!("Connected to PostgreSQL");

    Ok(Arc::new(PgCommentRepository::new(manager.pool().clone())))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
