//! Per-request dispatch.
//!
//! Every inbound request lands here. OPTIONS preflights and the two control
//! paths short-circuit before route resolution; everything else resolves to a
//! backend and is forwarded over the shared transport.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::proxy::headers::apply_gateway_headers;
use crate::proxy::server::AppState;

const STATUS_BODY: &str = "avenues is functioning";
const RESET_BODY: &str = "routes have been reset";

/// Single dispatch point for every inbound request.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    if request.method() == Method::OPTIONS {
        tracing::debug!("responding with cors headers for options request");
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_gateway_headers(response.headers_mut());
        return response;
    }

    let path = request.uri().path().to_string();

    if path == state.config.status_path {
        return (StatusCode::OK, STATUS_BODY).into_response();
    }

    if path == state.config.reset_path {
        state.config.table.reset_all();
        tracing::info!("route cursors reset");
        return (StatusCode::OK, RESET_BODY).into_response();
    }

    let query = request.uri().query().map(str::to_string);
    let backend = match state.config.table.resolve(&path, query.as_deref()) {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!(path = %path, error = %err, "failed to resolve backend");
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    forward(&state, request, backend).await
}

/// Forward a resolved request and relay the backend's response.
async fn forward(state: &AppState, request: Request<Body>, backend: Url) -> Response {
    let (parts, body) = request.into_parts();

    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(error = %err, "failed to read request body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let inbound_host = parts
        .headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let mut headers = parts.headers.clone();
    // Hop-managed headers; the client regenerates them for the new authority.
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::CONNECTION);

    // Append, so a client-supplied forwarded-host chain survives.
    if let Ok(value) = HeaderValue::from_str(&inbound_host) {
        headers.append("x-forwarded-host", value);
    }
    if let Ok(value) = HeaderValue::from_str(&backend_authority(&backend)) {
        headers.append("x-origin-host", value);
    }

    let upstream = match state
        .client
        .request(parts.method.clone(), backend.clone())
        .headers(headers)
        .body(body_bytes)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(backend = %backend, error = %err, "upstream request failed");
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let status = upstream.status();

    // Copy with append so multi-valued headers survive as multiple values.
    let mut response_headers = HeaderMap::new();
    for (name, value) in upstream.headers() {
        if name == &header::TRANSFER_ENCODING || name == &header::CONNECTION {
            continue;
        }
        response_headers.append(name.clone(), value.clone());
    }
    apply_gateway_headers(&mut response_headers);

    let relayed = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(backend = %backend, error = %err, "failed to read upstream response");
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    tracing::info!(uri = %parts.uri, backend = %backend, status = %status, "proxied request");

    let mut response = Response::new(Body::from(relayed));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    response
}

/// Host:port authority of a resolved backend URL.
fn backend_authority(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}
