//! # campus-server
//!
//! The Campus Hub HTTP service: a JSON API over [`campus_db::CampusService`],
//! a session-gated dashboard, multipart uploads into object storage, and a
//! WebSocket bridge onto the in-process change feed.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use campus_config::CampusConfig;

pub use error::{ApiError, ServerError};
pub use router::build_router;
pub use state::{AppState, SharedState};

/// How often expired sessions are purged.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Open every backend named by `config` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns `ServerError` if a backend cannot be opened or the listener
/// cannot bind.
pub async fn serve(config: CampusConfig) -> Result<(), ServerError> {
    let bind_addr = config.server.bind_addr();
    let state: SharedState = Arc::new(AppState::from_config(config).await?);

    let purge_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(error) = purge_state.auth.purge_expired().await {
                tracing::warn!(%error, "session purge failed");
            }
        }
    });

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "campus hub listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("campus hub stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
