//! Request body negotiation.
//!
//! Decides what, if anything, goes upstream as the request body based on the
//! declared `Content-Type`. JSON is canonicalized; everything else passes
//! through untouched.

use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, Method},
};

use crate::error::GatewayError;
use crate::http::request::InboundRequest;

/// Body prepared for the upstream request.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardBody {
    /// Re-serialized JSON text.
    Json(String),
    /// Form-encoded or plain text, forwarded byte for byte whatever the charset.
    Text(Bytes),
    /// Multipart or unknown payloads, forwarded byte for byte.
    Binary(Bytes),
}

impl ForwardBody {
    /// Serialize `value` as a JSON body.
    pub fn json(value: &serde_json::Value) -> Self {
        ForwardBody::Json(value.to_string())
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            ForwardBody::Json(s) => Bytes::from(s),
            ForwardBody::Text(b) | ForwardBody::Binary(b) => b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Text,
    Binary,
}

impl BodyKind {
    /// Classify by media type; parameters such as `charset` are ignored.
    fn of(content_type: Option<&str>) -> Self {
        let media_type = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|mt| mt.trim().to_ascii_lowercase());

        match media_type.as_deref() {
            Some("application/json") => BodyKind::Json,
            Some("application/x-www-form-urlencoded") | Some("text/plain") => BodyKind::Text,
            _ => BodyKind::Binary,
        }
    }
}

/// Headers and body to forward for `request`.
///
/// GET, HEAD and empty bodies forward nothing. The caller's `Content-Type`
/// is kept whenever a body is forwarded.
pub fn build_forward_body(
    request: &InboundRequest,
) -> Result<(HeaderMap, Option<ForwardBody>), GatewayError> {
    let mut headers = HeaderMap::new();

    if matches!(*request.method(), Method::GET | Method::HEAD) || request.body_bytes().is_empty() {
        return Ok((headers, None));
    }

    if let Some(content_type) = request.headers().get(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, content_type.clone());
    }

    let body = match BodyKind::of(request.content_type()) {
        BodyKind::Json => ForwardBody::json(&request.body_json()?),
        BodyKind::Text => ForwardBody::Text(request.body_bytes().clone()),
        BodyKind::Binary => ForwardBody::Binary(request.body_bytes().clone()),
    };

    Ok((headers, Some(body)))
}

/// Headers and body for routes that require a JSON payload regardless of the
/// declared content type.
pub fn require_json_body(
    request: &InboundRequest,
) -> Result<(HeaderMap, Option<ForwardBody>), GatewayError> {
    let value = request.body_json()?;
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok((headers, Some(ForwardBody::json(&value))))
}
