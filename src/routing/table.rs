//! Route lookup and backend URL resolution.

use std::collections::HashMap;

use thiserror::Error;
use url::{form_urlencoded, Url};

use crate::config::schema::RouteConfig;
use crate::routing::route::Route;

/// Per-request resolution failures. All of these surface as `404` at the
/// HTTP boundary; none of them reach the backend.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No configured prefix matches the request path.
    #[error("route not found for path: {path}")]
    RouteNotFound { path: String },

    /// An ordinal route matched but its backend list is empty.
    #[error("ordinal route '{prefix}' requires a backends directive")]
    BackendUnavailable { prefix: String },

    /// The configured backend string is not a parseable URL.
    #[error("failed to parse backend address '{backend}': {source}")]
    InvalidBackendUrl {
        backend: String,
        source: url::ParseError,
    },
}

/// The in-memory route table.
///
/// Prefixes are normalized to end with `/` and held sorted by descending
/// length, so lookup is a deterministic longest-prefix-wins scan. The table's
/// shape never changes after construction; only route cursors mutate.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<(String, Route)>,
}

impl RouteTable {
    /// Compile a table from the configuration's prefix → route mapping.
    pub fn from_config(routes: HashMap<String, RouteConfig>) -> Self {
        Self::new(
            routes
                .into_iter()
                .map(|(prefix, config)| (prefix, Route::from_config(config)))
                .collect(),
        )
    }

    /// Build a table from already-compiled routes.
    pub fn new(entries: Vec<(String, Route)>) -> Self {
        let mut entries: Vec<(String, Route)> = entries
            .into_iter()
            .map(|(prefix, route)| (ensure_trailing_slash(&prefix), route))
            .collect();

        // Longest prefix first, so the linear scan below is longest-match.
        entries.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self { entries }
    }

    /// Number of configured routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a request path (and raw query) to a concrete backend URL.
    ///
    /// Matching uses the path with a trailing slash appended; the URL handed
    /// back carries the original path untouched and the query re-encoded as
    /// canonical key/value pairs.
    pub fn resolve(&self, path: &str, query: Option<&str>) -> Result<Url, ResolveError> {
        let normalized = ensure_trailing_slash(path);

        let (prefix, route) = self
            .entries
            .iter()
            .find(|(prefix, _)| normalized.starts_with(prefix.as_str()))
            .ok_or_else(|| ResolveError::RouteNotFound {
                path: path.to_string(),
            })?;

        let backend = route.select().ok_or_else(|| ResolveError::BackendUnavailable {
            prefix: prefix.clone(),
        })?;

        let mut url = Url::parse(backend).map_err(|source| ResolveError::InvalidBackendUrl {
            backend: backend.to_string(),
            source,
        })?;

        url.set_path(path);
        url.set_query(None);

        if let Some(raw) = query.filter(|q| !q.is_empty()) {
            let pairs: Vec<(String, String)> =
                form_urlencoded::parse(raw.as_bytes()).into_owned().collect();
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }

        Ok(url)
    }

    /// Zero every route's rotation cursor.
    pub fn reset_all(&self) {
        for (_, route) in &self.entries {
            route.reset();
        }
    }
}

fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}
