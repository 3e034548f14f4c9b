//! Request-scoped error type.
//!
//! Every failure while handling a single API request ends up here and is
//! rendered as a JSON `{"error": ...}` body. None of these are fatal to the
//! process.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// No credential in the query, `X-ZT-Token`, or `Authorization`.
    #[error("missing token")]
    MissingToken,

    /// Credential contains bytes that cannot be sent in a header.
    #[error("invalid token")]
    InvalidToken,

    #[error("missing or invalid path parameter")]
    InvalidPath,

    #[error("invalid JSON payload")]
    InvalidJson(#[source] serde_json::Error),

    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("no API route for {0}")]
    RouteNotFound(String),

    #[error("method {0} not allowed for this route")]
    MethodNotAllowed(Method),

    /// Transport failure talking to the upstream (DNS, refused, TLS, timeout).
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingToken | GatewayError::InvalidToken => StatusCode::UNAUTHORIZED,
            GatewayError::InvalidPath
            | GatewayError::InvalidJson(_)
            | GatewayError::BodyRead(_) => StatusCode::BAD_REQUEST,
            GatewayError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MissingToken => "missing_token",
            GatewayError::InvalidToken => "invalid_token",
            GatewayError::InvalidPath => "invalid_path",
            GatewayError::InvalidJson(_) => "invalid_json",
            GatewayError::BodyTooLarge { .. } => "body_too_large",
            GatewayError::BodyRead(_) => "body_read",
            GatewayError::RouteNotFound(_) => "route_not_found",
            GatewayError::MethodNotAllowed(_) => "method_not_allowed",
            GatewayError::Upstream(_) => "upstream",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            GatewayError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream request failed");
            }
            other => {
                tracing::warn!(status = %status, error = %other, "Request rejected");
            }
        }
        metrics::record_rejection(self.kind());

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
