//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler
//! - Wire up middleware (gate, tracing, timeout, request ID)
//! - Bind server to listener
//! - Graceful shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::any, Router};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::blocker::{grpc_blocker_middleware, Gate};
use crate::config::{AppConfig, ConfigError};
use crate::http::upstream::{forward_handler, Upstream};

/// HTTP server placing the gate in front of the upstream.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let gate = Arc::new(Gate::new(&config.blocker)?);
        let upstream = Upstream::new(&config.upstream)?;

        tracing::info!(
            blocked_services = ?gate.blocked_services(),
            enable_logging = config.blocker.enable_logging,
            upstream = %upstream.authority(),
            "gRPC blocker initialized"
        );

        let router = Self::build_router(&config, gate, upstream);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost-first on the way in: request ID, trace, timeout,
    /// then the gate, then the forwarding handler.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, gate: Arc<Gate>, upstream: Upstream) -> Router {
        Router::new()
            .fallback(forward_handler)
            .with_state(upstream)
            .layer(middleware::from_fn_with_state(gate, grpc_blocker_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.upstream.timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Router with every layer applied, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_until(listener, shutdown_signal()).await
    }

    /// Run until `signal` resolves, then drain in-flight requests.
    pub async fn run_until<F>(self, listener: TcpListener, signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
