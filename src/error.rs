//! Startup-fatal error types for the gateway.
//!
//! Everything here aborts startup; per-request resolution errors live in
//! [`crate::routing`] and only ever map to an HTTP status code.

use thiserror::Error;

/// Errors that prevent the gateway from starting.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    /// Configuration file could not be parsed as YAML.
    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Configuration is syntactically valid but semantically broken.
    #[error("invalid configuration: {0}")]
    ConfigValidation(String),

    /// A cert/key/ca `*_path` file could not be read.
    #[error("failed to read {kind} from {path}: {source}")]
    PemRead {
        kind: &'static str,
        path: String,
        source: std::io::Error,
    },

    /// CA bundle contained no parseable certificates.
    #[error("failed to build CA cert pool: {0}")]
    CaBundle(String),

    /// Inbound TLS certificate or key material is malformed.
    #[error("failed to configure TLS listener: {0}")]
    Tls(String),

    /// Outbound client construction failed.
    #[error("failed to build outbound transport: {0}")]
    Transport(#[from] reqwest::Error),

    /// I/O error wrapper (listener bind and friends).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Creates a configuration validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation(message.into())
    }
}

/// Result type alias using GatewayError.
pub type Result<T> = std::result::Result<T, GatewayError>;
