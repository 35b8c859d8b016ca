//! Gateway assembly and serving.
//!
//! # Responsibilities
//! - Build the axum Router (one wildcard route into the dispatcher)
//! - Hold shared state: resolved config + outbound client
//! - Serve plaintext, or TLS when cert/key material is configured

use std::sync::Arc;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::error::Result;
use crate::net;
use crate::proxy::dispatcher::dispatch;

/// Shared state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    /// Resolved gateway configuration, route table included.
    pub config: Arc<GatewayConfig>,

    /// Shared connection-pooled outbound client.
    pub client: reqwest::Client,
}

/// The assembled gateway: configuration plus outbound transport.
pub struct Gateway {
    state: AppState,
}

impl Gateway {
    /// Build a gateway from a resolved configuration.
    ///
    /// Constructs the shared outbound transport; a malformed CA bundle fails
    /// here, before any listener exists.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = net::build_client(config.ca_pem.as_deref())?;

        Ok(Self {
            state: AppState {
                config: Arc::new(config),
                client,
            },
        })
    }

    /// Build the axum router backed by this gateway's state.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Serve on the given listener, terminating TLS when configured.
    pub async fn run(self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr()?;
        let config = self.state.config.clone();
        let app = self.router();

        if let (Some(cert), Some(key)) = (&config.cert_pem, &config.key_pem) {
            let tls = net::build_listener_config(cert, key)?;
            tracing::info!(address = %addr, "gateway listening with TLS");

            axum_server::from_tcp_rustls(listener.into_std()?, tls)
                .serve(app.into_make_service())
                .await?;
        } else {
            tracing::info!(address = %addr, "gateway listening");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }

        tracing::info!("gateway stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
