//! HTTP and WebSocket surface
//!
//! The read-only REST endpoints and the signaling WebSocket share one
//! axum router with a permissive cross-origin policy.

pub mod handlers;
pub mod routes;
pub mod ws;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::state::AppState;

/// Bind and serve until a shutdown signal arrives
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
