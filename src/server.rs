//! Listener setup and graceful shutdown.

use std::time::Duration;

use anyhow::Context;
use axum_server::{tls_rustls::RustlsConfig, Handle};

use crate::api;
use crate::config::ServerConfig;
use crate::db::Database;

/// How long in-flight requests may run after a shutdown signal.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Serve the note API until a termination signal arrives.
pub async fn run(config: ServerConfig, db: Database) -> anyhow::Result<()> {
    let handle = Handle::new();
    tokio::spawn(shutdown_on_signal(handle.clone()));
    serve(config, db, handle).await
}

/// Serve the note API until `handle` is told to shut down.
pub async fn serve(config: ServerConfig, db: Database, handle: Handle) -> anyhow::Result<()> {
    let app = api::create_router(db);

    match config.tls {
        Some(tls) => {
            let rustls = RustlsConfig::from_pem_file(&tls.cert, &tls.key)
                .await
                .with_context(|| {
                    format!(
                        "failed to load TLS certificate {} and key {}",
                        tls.cert.display(),
                        tls.key.display()
                    )
                })?;
            tracing::info!("hnote listening on https://{}", config.addr);
            axum_server::bind_rustls(config.addr, rustls)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("server error")?;
        }
        None => {
            tracing::info!("hnote listening on http://{}", config.addr);
            axum_server::bind(config.addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("server error")?;
        }
    }

    tracing::info!("hnote stopped");
    Ok(())
}

async fn shutdown_on_signal(handle: Handle) {
    shutdown_signal().await;
    tracing::info!(
        "Shutting down, waiting up to {}s for in-flight requests",
        SHUTDOWN_GRACE_PERIOD.as_secs()
    );
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
}
