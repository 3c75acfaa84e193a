//! Local File Server
//!
//! An HTTPS server giving a browser text editor CRUD access to the `.txt`
//! files in one local directory.

use anyhow::Context;
use axum_server::Handle;
use local_file_server::{app, config::Config, state::AppState, tls};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// How long in-flight requests get to finish after a shutdown signal
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=info,tower_http=info", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Initialize application state
    let state = AppState::from_config(&config);
    state.files.ensure_root().await.with_context(|| {
        format!(
            "Failed to create storage directory {}",
            config.storage.files_dir.display()
        )
    })?;

    let tls_config = match tls::load_rustls_config(&config.tls).await {
        Ok(tls_config) => tls_config,
        Err(e) => {
            error!(
                "Unable to load TLS certificate, make sure it has been generated: {:#}",
                e
            );
            return Err(e);
        }
    };

    let cors = app::build_cors_layer(&config.cors)?;
    let app = app::build_router(Arc::new(state), cors);

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("Server running on https://{}", addr);
    info!("Storage directory: {}", config.storage.files_dir.display());
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Setup graceful shutdown
    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    axum_server::bind_rustls(addr, tls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .inspect_err(|e| error!("Server error: {}", e))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }

    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
