//! Avenues reverse-proxy gateway library.

pub mod config;
pub mod error;
pub mod net;
pub mod proxy;
pub mod routing;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use proxy::Gateway;
