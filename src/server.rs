//! Keep-alive endpoint
//!
//! The deployment host decides whether the process is healthy by polling
//! a single route; it says nothing about crawl progress. Binding happens
//! before the pipeline starts, and a bind failure is fatal to startup.

use crate::Result;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const LIVENESS_MESSAGE: &str = "cardex scraper is alive";

/// Binds the liveness route on all interfaces and serves it in the
/// background
///
/// # Arguments
///
/// * `port` - TCP port to listen on
///
/// # Returns
///
/// * `Ok(JoinHandle)` - Server task; runs until the process exits
/// * `Err(CardexError)` - The listener could not be bound
pub async fn spawn_keepalive(port: u16) -> Result<JoinHandle<()>> {
    let app = Router::new().route("/", get(|| async { LIVENESS_MESSAGE }));
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;

    tracing::info!("keep-alive server listening on port {}", port);

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("keep-alive server error: {}", e);
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_binds_ephemeral_port() {
        let handle = spawn_keepalive(0).await.unwrap();
        handle.abort();
    }
}
