//! # Till Counter Server
//!
//! Binary entry point: load configuration, open the database, serve.
//!
//! ```text
//! env ──► ServerConfig ──► Database::new (migrations) ──► AppState
//!                                                            │
//!                      summarizer::from_config ──────────────┘
//!                                                            │
//!                               axum::serve ◄── build_router ┘
//!                                    │
//!                            ctrl-c / SIGTERM ──► db.close()
//! ```

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use till_db::{Database, DbConfig};
use till_server::{build_router, summarizer, AppState, ServerConfig};

const DEFAULT_LOG_FILTER: &str = "info,till_server=debug,till_db=debug,sqlx=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();

    info!("Starting till counter server...");

    // Load configuration
    let config = ServerConfig::load().context("loading configuration")?;
    info!(?config, "Configuration loaded");

    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    // Connect to database (runs migrations)
    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.db_max_connections),
    )
    .await
    .context("opening database")?;

    let summarizer = summarizer::from_config(&config.summary).context("building summary client")?;
    if config.summary.api_key.is_none() {
        warn!("GEMINI_API_KEY not set, summary requests will fail");
    }

    let state = AppState::new(db.clone(), Arc::from(summarizer));
    let app = build_router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
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
