//! HTTP server initialization and runtime setup.
//!
//! Wires the shared cache, in-flight registry, fetcher, and transformer into
//! the coordinator, then runs the Axum server until a shutdown signal.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::application::services::ResizeService;
use crate::config::Config;
use crate::infrastructure::cache::ResultCache;
use crate::infrastructure::fetch::HttpFetcher;
use crate::infrastructure::inflight::InFlightRegistry;
use crate::infrastructure::transform::JpegTransformer;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// The cache and registry are constructed once here and passed explicitly to
/// the coordinator; they are the only state shared across requests.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the listen address is
/// invalid, the bind fails, or a server runtime error occurs.
pub async fn run(config: Config) -> Result<()> {
    let cache = Arc::new(ResultCache::new(config.cache_capacity));
    let registry = InFlightRegistry::new();

    let fetcher = Arc::new(HttpFetcher::new(
        config.max_source_bytes,
        Duration::from_secs(config.fetch_timeout_secs),
    )?);
    let transformer = Arc::new(JpegTransformer::new());

    let resize_service = Arc::new(ResizeService::new(
        fetcher,
        transformer,
        cache,
        registry,
        config.base_url.clone(),
        Duration::from_secs(config.poll_timeout_secs),
    ));

    let state = AppState::new(resize_service);
    let app = app_router(state, config.max_request_bytes);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down server...");
}
