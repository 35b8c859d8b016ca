//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     resolved PEM material (from config)
//!     → transport.rs (shared outbound client: pool limits, CA trust)
//!     → tls.rs (optional inbound rustls listener config)
//!
//! Any parse failure here is startup-fatal; the gateway never serves with a
//! broken trust or identity configuration.
//! ```

pub mod tls;
pub mod transport;

pub use tls::build_listener_config;
pub use transport::build_client;
