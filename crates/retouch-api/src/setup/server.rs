//! Listener and shutdown

use anyhow::{Context, Result};
use axum::Router;
use retouch_core::Config;

/// Bind the configured address and serve until SIGINT or SIGTERM.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        addr = %addr,
        environment = %config.environment,
        max_upload_mb = config.max_upload_size_bytes / 1024 / 1024,
        extensions = %config.allowed_extensions.join(","),
        jpeg_quality = config.jpeg_quality,
        "Editor listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = stop_requested().await;
            tracing::info!(signal, "Stop requested, finishing in-flight requests");
        })
        .await
        .context("Server error")?;

    tracing::info!("Editor stopped");
    Ok(())
}

/// Name of the signal that asked the process to stop.
///
/// A handler that cannot be installed is logged and never fires, so the
/// server keeps running instead of stopping at once.
async fn stop_requested() -> &'static str {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminated() => "SIGTERM",
    }
}

#[cfg(unix)]
async fn terminated() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "SIGTERM handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminated() {
    std::future::pending::<()>().await;
}
