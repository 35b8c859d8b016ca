//! The fixed CORS/cache-control header set.
//!
//! Stamped on OPTIONS preflight responses and onto every proxied response
//! after the backend's headers are copied, so these values always win.

use axum::http::{header, HeaderMap, HeaderValue};

/// Overwrite the gateway's CORS and cache-control headers onto `headers`.
pub fn apply_gateway_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*, Authorization"),
    );
    headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("60"));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(
            "no-store, no-cache, must-revalidate, post-check=0, pre-check=0",
        ),
    );
    headers.insert(header::VARY, HeaderValue::from_static("Accept-Encoding"));
}
