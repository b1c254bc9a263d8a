//! Server builder and lifecycle

use crate::error::ServerError;
use crate::router::{create_router, AppState};
use axum::Router;
use condscan_config::CondscanConfig;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Builder for [`ScanServer`]
///
/// Starts from the same defaults as [`CondscanConfig::default`].
#[derive(Debug, Clone)]
pub struct ScanServerBuilder {
    host: String,
    port: u16,
    cors_enabled: bool,
    max_body_bytes: usize,
    blocking_batch_threshold: usize,
}

impl Default for ScanServerBuilder {
    fn default() -> Self {
        Self::from_config(&CondscanConfig::default())
    }
}

impl ScanServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed every setting from a loaded configuration
    pub fn from_config(config: &CondscanConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            cors_enabled: config.server.cors_enabled,
            max_body_bytes: config.server.max_body_bytes,
            blocking_batch_threshold: config.scan.blocking_batch_threshold,
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn cors_enabled(mut self, enabled: bool) -> Self {
        self.cors_enabled = enabled;
        self
    }

    pub fn max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }

    pub fn blocking_batch_threshold(mut self, threshold: usize) -> Self {
        self.blocking_batch_threshold = threshold;
        self
    }

    /// Resolve the bind address and produce a server
    pub fn build(self) -> Result<ScanServer, ServerError> {
        let address = format!("{}:{}", self.host, self.port);
        let addr: SocketAddr = address
            .parse()
            .map_err(|source| ServerError::InvalidAddress { address, source })?;

        Ok(ScanServer {
            addr,
            cors_enabled: self.cors_enabled,
            max_body_bytes: self.max_body_bytes,
            state: AppState::new(self.blocking_batch_threshold),
        })
    }
}

/// HTTP scan service
#[derive(Debug)]
pub struct ScanServer {
    addr: SocketAddr,
    cors_enabled: bool,
    max_body_bytes: usize,
    state: AppState,
}

impl ScanServer {
    /// Configured bind address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Router with all routes and layers attached
    pub fn router(&self) -> Router {
        create_router(self.state.clone(), self.cors_enabled, self.max_body_bytes)
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn serve(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.addr).await?;
        self.serve_with_listener(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve_with_listener<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr()?;
        let app = self.router();
        info!("Condscan server listening on http://{}", local);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Condscan server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server gracefully");
}
