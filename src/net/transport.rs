//! Shared outbound HTTP transport.

use reqwest::{Certificate, Client};

use crate::error::{GatewayError, Result};

/// Idle connections kept alive per backend host.
const MAX_IDLE_CONNS_PER_HOST: usize = 50;

/// Build the connection-pooled client every dispatch goes through.
///
/// When a CA bundle is configured it becomes the sole trust anchor set for
/// outbound TLS; built-in roots are dropped. Without one, system roots apply.
pub fn build_client(ca_pem: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder()
        .use_rustls_tls()
        .pool_max_idle_per_host(MAX_IDLE_CONNS_PER_HOST);

    if let Some(pem) = ca_pem {
        let certs = Certificate::from_pem_bundle(pem.as_bytes())
            .map_err(|e| GatewayError::CaBundle(e.to_string()))?;
        if certs.is_empty() {
            return Err(GatewayError::CaBundle(
                "no certificates found in CA material".to_string(),
            ));
        }

        builder = builder.tls_built_in_root_certs(false);
        for cert in certs {
            builder = builder.add_root_certificate(cert);
        }
    }

    Ok(builder.build()?)
}
