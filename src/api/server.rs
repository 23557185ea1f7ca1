//! API server lifecycle: starts and stops the axum HTTP server.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

/// Handle to a running API server.
pub struct ApiServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ApiServer {
    /// Address actually bound (resolves port 0 to the ephemeral port).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }

    /// Signal shutdown and wait for in-flight requests to finish.
    pub async fn stop(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::error!("API server task failed: {e}");
            }
        }
    }
}

/// Bind `addr` and serve the API in a background tokio task.
pub async fn start_api_server(ctx: ApiContext, addr: SocketAddr) -> Result<ApiServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind API server on {addr}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = api_router(ctx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        handle: Some(handle),
    })
}
