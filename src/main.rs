//! Avenues — configuration-driven reverse-proxy gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  AVENUES                      │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐   ┌────────────┐   ┌─────────┐  │
//!   ──────────────────▶│  │ listener│──▶│ dispatcher │──▶│ routing │  │
//!                      │  │ (TLS?)  │   │            │   │  table  │  │
//!                      │  └─────────┘   └─────┬──────┘   └────┬────┘  │
//!                      │                      │               │       │
//!                      │      OPTIONS/status/reset       resolved URL │
//!                      │      short-circuit              │            │
//!                      │                      ▼          ▼            │
//!   Client Response    │  ┌─────────┐   ┌────────────────────┐        │
//!   ◀──────────────────│  │ headers │◀──│  outbound client   │◀───────┼── Backend
//!                      │  │ (CORS)  │   │  (pooled, CA pool) │        │
//!                      │  └─────────┘   └────────────────────┘        │
//!                      └──────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use avenues::{config, Gateway};

const BIND_ADDRESS: &str = "0.0.0.0:4567";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avenues=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("avenues v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match config::load_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        routes = config.table.len(),
        status_path = %config.status_path,
        reset_path = %config.reset_path,
        tls = config.tls_enabled(),
        "configuration loaded"
    );

    let gateway = match Gateway::new(config) {
        Ok(gateway) => gateway,
        Err(err) => {
            tracing::error!(error = %err, "failed to build gateway");
            std::process::exit(1);
        }
    };

    let listener = TcpListener::bind(BIND_ADDRESS).await?;
    gateway.run(listener).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
