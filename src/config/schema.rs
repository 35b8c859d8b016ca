//! Configuration schema definitions.
//!
//! These types mirror the YAML config file one-to-one. All of them derive
//! Serde traits; semantic checks live in the loader, not here.

use std::collections::HashMap;

use serde::Deserialize;

/// Root of the YAML configuration file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    /// Path-prefix → route definitions.
    pub routes: HashMap<String, RouteConfig>,

    /// Liveness probe path. Defaults to `/avenues/status`.
    pub status: Option<String>,

    /// Round-robin reset path. Defaults to `/avenues/reset`.
    pub reset: Option<String>,

    /// Inline PEM certificate for the TLS listener.
    pub cert: Option<String>,

    /// Path to a PEM certificate file; wins over `cert` when both are set.
    pub cert_path: Option<String>,

    /// Inline PEM private key for the TLS listener.
    pub key: Option<String>,

    /// Path to a PEM private key file; wins over `key` when both are set.
    pub key_path: Option<String>,

    /// Inline PEM CA bundle trusted for outbound TLS.
    pub ca: Option<String>,

    /// Path to a PEM CA bundle file; wins over `ca` when both are set.
    pub ca_path: Option<String>,
}

/// Forwarding policy for a single path prefix.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// Route kind. A missing `type` means `static`.
    #[serde(rename = "type", default)]
    pub kind: RouteKind,

    /// Single backend URL, required for static routes.
    #[serde(default)]
    pub backend: Option<String>,

    /// Ordered backend URLs, required for ordinal routes.
    #[serde(default)]
    pub backends: Option<Vec<String>>,
}

/// How a route picks its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Every request goes to the one configured backend.
    #[default]
    Static,
    /// Requests walk the backend list in order, sticking on the last entry.
    Ordinal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_route_defaults_to_static() {
        let yaml = r#"
routes:
  /api/:
    backend: "http://api.internal:8080"
"#;
        let file: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        let route = file.routes.get("/api/").unwrap();
        assert_eq!(route.kind, RouteKind::Static);
        assert_eq!(route.backend.as_deref(), Some("http://api.internal:8080"));
        assert!(route.backends.is_none());
    }

    #[test]
    fn test_ordinal_route_parses_backend_list() {
        let yaml = r#"
routes:
  /rotation/:
    type: ordinal
    backends:
      - "http://one.internal"
      - "http://two.internal"
status: "/custom/status"
"#;
        let file: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        let route = file.routes.get("/rotation/").unwrap();
        assert_eq!(route.kind, RouteKind::Ordinal);
        assert_eq!(route.backends.as_ref().unwrap().len(), 2);
        assert_eq!(file.status.as_deref(), Some("/custom/status"));
        assert!(file.reset.is_none());
    }

    #[test]
    fn test_tls_material_fields() {
        let yaml = r#"
routes: {}
cert_path: "/etc/avenues/tls.crt"
key_path: "/etc/avenues/tls.key"
ca: |
  -----BEGIN CERTIFICATE-----
  ...
  -----END CERTIFICATE-----
"#;
        let file: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.cert_path.as_deref(), Some("/etc/avenues/tls.crt"));
        assert!(file.ca.as_deref().unwrap().contains("BEGIN CERTIFICATE"));
    }
}
