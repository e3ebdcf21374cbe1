//! TCP listener running the hashtag router.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use super::handlers::create_router;
use super::state::AppState;
use crate::error::{HashtagError, Result};

/// HTTP server over a plain TCP listener.
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a server for the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Configured bind address.
    pub fn listen_addr(&self) -> SocketAddr {
        self.state.config.addr
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(&self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Bind and serve until `shutdown` resolves.
    ///
    /// In-flight requests are allowed to finish; a caller that disconnects
    /// drops its handler future together with the backend call it awaits.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.listen_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| HashtagError::Server(format!("Failed to bind TCP to {addr}: {e}")))?;

        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = create_router(Arc::clone(&self.state));

        if let Ok(addr) = listener.local_addr() {
            tracing::info!("Hashtag server listening on {}", addr);
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| HashtagError::Server(format!("TCP server error: {e}")))?;

        tracing::info!("Hashtag server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
