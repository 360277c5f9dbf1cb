//! # Shelfmark Server
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tracing-subscriber (RUST_LOG, default info,shelfmark=debug)           │
//! │       │                                                                 │
//! │  ServerConfig::load()            env → port, db path, shop profile     │
//! │       │                                                                 │
//! │  Database::new()                 pool + migrations                     │
//! │       │                                                                 │
//! │  AppState::new()                 engines, renderers, encoders          │
//! │       │                                                                 │
//! │  axum::serve(...)                until Ctrl+C / SIGTERM                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use shelfmark_core::SystemClock;
use shelfmark_db::{Database, DbConfig};
use shelfmark_server::encoders::{Code128Bars, QrSvg};
use shelfmark_server::{AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,shelfmark=debug")),
        )
        .with_target(true)
        .init();

    info!("Starting Shelfmark server...");

    let config = ServerConfig::load()?;
    info!(
        port = config.port,
        database = %config.database_path.display(),
        shop = %config.shop.name,
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&config.database_path))
        .await
        .context("opening database")?;

    let state = AppState::new(
        db.clone(),
        Arc::new(SystemClock),
        config.shop.clone(),
        Arc::new(Code128Bars::default()),
        Arc::new(QrSvg::default()),
        config.client_base_url.clone(),
    );
    let app = shelfmark_server::app(Arc::new(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
