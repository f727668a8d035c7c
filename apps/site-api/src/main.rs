//! # GP Invest Site API
//!
//! HTTP/JSON server for the company website.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Site API Server                                  │
//! │                                                                         │
//! │  Website ───► HTTP (3001) ───► Services ───► ContentStore              │
//! │                                    │                                    │
//! │  CMS ───► /api/revalidate ───► ResponseCache                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use site_api::{router, AppState, ContentStore, SiteConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,site_api=debug,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting GP Invest site API...");

    // Load configuration
    let config = SiteConfig::load()?;
    info!(
        port = config.port,
        rate = %config.eur_to_bgn_rate,
        show_bgn = config.show_bgn_price,
        "Configuration loaded"
    );
    if config.revalidate_secret.is_none() {
        warn!("REVALIDATE_SECRET is not set; /api/revalidate will reject every request");
    }

    // Load content
    let store = match &config.content_snapshot {
        Some(path) => ContentStore::load_file(path)
            .with_context(|| format!("loading content snapshot {}", path))?,
        None => {
            warn!("CONTENT_SNAPSHOT is not set, starting with an empty catalog");
            ContentStore::default()
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(AppState::new(config, store));
    let app = router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
