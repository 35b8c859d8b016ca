//! TLS configuration for the inbound listener.

use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use rustls::crypto::{aws_lc_rs, CryptoProvider};
use rustls::pki_types::CertificateDer;
use rustls::{ServerConfig, SupportedCipherSuite};

use crate::error::{GatewayError, Result};

/// AEAD, forward-secret suites only. rustls negotiates with server-side
/// preference, in the order listed here.
fn allowed_cipher_suites() -> Vec<SupportedCipherSuite> {
    use rustls::crypto::aws_lc_rs::cipher_suite::*;

    vec![
        TLS13_AES_256_GCM_SHA384,
        TLS13_AES_128_GCM_SHA256,
        TLS13_CHACHA20_POLY1305_SHA256,
        TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
        TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
        TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
        TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
        TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
        TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
    ]
}

/// Build the rustls listener configuration from PEM cert and key material.
///
/// Enforces a TLS 1.2 floor and the cipher allow-list above. Malformed
/// material is startup-fatal.
pub fn build_listener_config(cert_pem: &str, key_pem: &str) -> Result<RustlsConfig> {
    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut cert_pem.as_bytes())
        .collect::<std::io::Result<_>>()
        .map_err(|e| GatewayError::Tls(format!("failed to parse certificate: {e}")))?;

    if certs.is_empty() {
        return Err(GatewayError::Tls(
            "no certificates found in cert material".to_string(),
        ));
    }

    let key = rustls_pemfile::private_key(&mut key_pem.as_bytes())
        .map_err(|e| GatewayError::Tls(format!("failed to parse private key: {e}")))?
        .ok_or_else(|| GatewayError::Tls("no private key found in key material".to_string()))?;

    let provider = CryptoProvider {
        cipher_suites: allowed_cipher_suites(),
        ..aws_lc_rs::default_provider()
    };

    let config = ServerConfig::builder_with_provider(Arc::new(provider))
        .with_protocol_versions(&[&rustls::version::TLS13, &rustls::version::TLS12])
        .map_err(|e| GatewayError::Tls(e.to_string()))?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| GatewayError::Tls(e.to_string()))?;

    Ok(RustlsConfig::from_config(Arc::new(config)))
}
