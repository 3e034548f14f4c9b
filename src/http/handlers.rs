//! API route handlers.
//!
//! Each handler buffers the request once, normalizes it into a
//! [`ForwardSpec`], and hands it to the forwarder. Any rejection happens
//! before the upstream is contacted.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, Uri},
    response::Response,
};

use crate::error::GatewayError;
use crate::http::body::{build_forward_body, require_json_body};
use crate::http::request::{extract_credential, normalize_path, InboundRequest};
use crate::routing::shortcuts::{route_rest_shortcut, shortcut_params, Payload};
use crate::upstream::{ForwardSpec, Forwarder};

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub forwarder: Forwarder,
    pub max_body_bytes: usize,
}

/// `ANY /api?token=<T>&path=<P>`: forward to `<base><P>` with the caller's
/// method and body.
pub async fn api_passthrough(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, GatewayError> {
    let inbound = InboundRequest::read(request, state.max_body_bytes).await?;

    let path = normalize_path(inbound.query("path")).ok_or(GatewayError::InvalidPath)?;
    let credential = extract_credential(&inbound).ok_or(GatewayError::MissingToken)?;
    let (headers, body) = build_forward_body(&inbound)?;

    state
        .forwarder
        .forward(ForwardSpec {
            method: inbound.method().clone(),
            path,
            credential,
            headers,
            body,
        })
        .await
}

/// `/api/networks/...` convenience routes.
pub async fn network_shortcut(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, GatewayError> {
    let inbound = InboundRequest::read(request, state.max_body_bytes).await?;

    let shortcut = route_rest_shortcut(inbound.method(), &shortcut_params(inbound.path()))?;
    let credential = extract_credential(&inbound).ok_or(GatewayError::MissingToken)?;
    let (headers, body) = match shortcut.payload() {
        Payload::None => (HeaderMap::new(), None),
        Payload::Json => require_json_body(&inbound)?,
    };

    tracing::debug!(route = shortcut.name(), "Convenience route resolved");

    state
        .forwarder
        .forward(ForwardSpec {
            method: shortcut.upstream_method(),
            path: shortcut.upstream_path(),
            credential,
            headers,
            body,
        })
        .await
}

/// Any other path under `/api`.
pub async fn api_not_found(uri: Uri) -> GatewayError {
    GatewayError::RouteNotFound(uri.path().to_string())
}
