//! Configuration loading from disk.
//!
//! The file location comes from `AVENUES_CONFIG_FILE`, falling back to
//! `./routes.yaml`. Inline PEM material and `*_path` file references are
//! resolved here so the rest of the gateway only ever sees PEM blobs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{ConfigFile, RouteKind};
use crate::error::{GatewayError, Result};
use crate::routing::RouteTable;

const DEFAULT_CONFIG_FILE: &str = "./routes.yaml";
const CONFIG_FILE_ENV: &str = "AVENUES_CONFIG_FILE";

const DEFAULT_STATUS_PATH: &str = "/avenues/status";
const DEFAULT_RESET_PATH: &str = "/avenues/reset";

/// Fully resolved gateway configuration.
///
/// Built once at startup and shared via `Arc`; the route table's shape is
/// immutable thereafter, only per-route cursors mutate.
#[derive(Debug)]
pub struct GatewayConfig {
    /// Compiled route table.
    pub table: RouteTable,

    /// Liveness probe path.
    pub status_path: String,

    /// Round-robin reset path.
    pub reset_path: String,

    /// CA bundle trusted for outbound TLS, as a PEM blob.
    pub ca_pem: Option<String>,

    /// Listener certificate chain, as a PEM blob.
    pub cert_pem: Option<String>,

    /// Listener private key, as a PEM blob.
    pub key_pem: Option<String>,
}

impl GatewayConfig {
    /// Whether the listener should terminate TLS.
    pub fn tls_enabled(&self) -> bool {
        self.cert_pem.is_some() && self.key_pem.is_some()
    }
}

/// Resolve the config file path from the environment.
pub fn config_file_path() -> PathBuf {
    std::env::var(CONFIG_FILE_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load and validate the configuration from the environment-selected file.
pub fn load_config() -> Result<GatewayConfig> {
    load_config_from(&config_file_path())
}

/// Load and validate the configuration from an explicit file path.
pub fn load_config_from(path: &Path) -> Result<GatewayConfig> {
    let contents = fs::read_to_string(path).map_err(|source| GatewayError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;

    let file: ConfigFile = serde_yaml::from_str(&contents)?;
    resolve(file)
}

/// Validate a parsed config file and resolve it into a [`GatewayConfig`].
pub fn resolve(file: ConfigFile) -> Result<GatewayConfig> {
    validate(&file)?;

    let ca_pem = resolve_pem("CA bundle", file.ca, file.ca_path)?;
    let cert_pem = resolve_pem("certificate", file.cert, file.cert_path)?;
    let key_pem = resolve_pem("private key", file.key, file.key_path)?;

    if cert_pem.is_some() != key_pem.is_some() {
        return Err(GatewayError::validation(
            "TLS requires both certificate and key material",
        ));
    }

    Ok(GatewayConfig {
        table: RouteTable::from_config(file.routes),
        status_path: file
            .status
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS_PATH.to_string()),
        reset_path: file
            .reset
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_RESET_PATH.to_string()),
        ca_pem,
        cert_pem,
        key_pem,
    })
}

/// Semantic validation on top of what serde already guarantees.
///
/// Static routes must name a backend up front. Ordinal routes with an empty
/// backend list are accepted here and rejected lazily at dispatch time, which
/// keeps a partially rolled-out rotation from blocking startup.
fn validate(file: &ConfigFile) -> Result<()> {
    for (prefix, route) in &file.routes {
        if prefix.is_empty() {
            return Err(GatewayError::validation("route prefix cannot be empty"));
        }

        if route.kind == RouteKind::Static
            && route.backend.as_deref().unwrap_or_default().is_empty()
        {
            return Err(GatewayError::validation(format!(
                "static route '{prefix}' requires a backend directive"
            )));
        }
    }

    Ok(())
}

/// Pick between inline PEM and a file reference; the file wins when both are
/// given and must be readable.
fn resolve_pem(
    kind: &'static str,
    inline: Option<String>,
    path: Option<String>,
) -> Result<Option<String>> {
    match path.filter(|p| !p.is_empty()) {
        Some(p) => {
            let pem = fs::read_to_string(&p).map_err(|source| GatewayError::PemRead {
                kind,
                path: p,
                source,
            })?;
            Ok(Some(pem))
        }
        None => Ok(inline.filter(|s| !s.is_empty())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_applies_default_control_paths() {
        let yaml = r#"
routes:
  /api/:
    backend: "http://api.internal:8080"
"#;
        let file = create_temp_config(yaml);
        let config = load_config_from(file.path()).unwrap();

        assert_eq!(config.status_path, "/avenues/status");
        assert_eq!(config.reset_path, "/avenues/reset");
        assert!(!config.tls_enabled());
    }

    #[test]
    fn test_load_honors_configured_control_paths() {
        let yaml = r#"
routes: {}
status: "/healthz"
reset: "/rotate"
"#;
        let file = create_temp_config(yaml);
        let config = load_config_from(file.path()).unwrap();

        assert_eq!(config.status_path, "/healthz");
        assert_eq!(config.reset_path, "/rotate");
    }

    #[test]
    fn test_unreadable_file_identifies_path() {
        let err = load_config_from(Path::new("/nonexistent/routes.yaml")).unwrap_err();
        match err {
            GatewayError::ConfigRead { path, .. } => {
                assert!(path.contains("/nonexistent/routes.yaml"));
            }
            other => panic!("expected ConfigRead, got {other}"),
        }
    }

    #[test]
    fn test_static_route_without_backend_is_rejected() {
        let yaml = r#"
routes:
  /api/:
    type: static
"#;
        let file = create_temp_config(yaml);
        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigValidation(_)));
    }

    #[test]
    fn test_ordinal_route_without_backends_loads() {
        // Deferred to dispatch time; see validate().
        let yaml = r#"
routes:
  /rotation/:
    type: ordinal
"#;
        let file = create_temp_config(yaml);
        assert!(load_config_from(file.path()).is_ok());
    }

    #[test]
    fn test_ca_path_wins_over_inline() {
        let ca_file = create_temp_config("-----BEGIN CERTIFICATE-----\nfromfile\n-----END CERTIFICATE-----\n");
        let yaml = format!(
            r#"
routes: {{}}
ca: "inline material"
ca_path: "{}"
"#,
            ca_file.path().display()
        );
        let file = create_temp_config(&yaml);
        let config = load_config_from(file.path()).unwrap();

        assert!(config.ca_pem.unwrap().contains("fromfile"));
    }

    #[test]
    fn test_missing_ca_path_is_fatal() {
        let yaml = r#"
routes: {}
ca_path: "/nonexistent/ca.pem"
"#;
        let file = create_temp_config(yaml);
        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, GatewayError::PemRead { kind: "CA bundle", .. }));
    }

    #[test]
    fn test_cert_without_key_is_rejected() {
        let yaml = r#"
routes: {}
cert: "-----BEGIN CERTIFICATE-----"
"#;
        let file = create_temp_config(yaml);
        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigValidation(_)));
    }
}
