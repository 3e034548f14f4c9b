//! Inbound request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Buffer the request body once, within the configured limit
//! - Expose typed accessors (query, header, body as bytes/text/JSON)
//! - Extract the upstream credential and the upstream path
//!
//! # Design Decisions
//! - The body is read exactly once when `InboundRequest` is built
//! - Credential sources are checked in a fixed priority order
//! - Credentials are redacted from `Debug` output

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;

use axum::{
    body::{Body, Bytes},
    extract::Query,
    http::{
        header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE},
        HeaderMap, HeaderName, HeaderValue, Method, Request, Uri,
    },
};
use http_body_util::LengthLimitError;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::error::GatewayError;

/// Custom header carrying the upstream credential.
pub const X_ZT_TOKEN: HeaderName = HeaderName::from_static("x-zt-token");

/// Request ID header name.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates a UUID v4 for every request lacking an `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// A fully buffered inbound request.
#[derive(Debug)]
pub struct InboundRequest {
    method: Method,
    uri: Uri,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: Bytes,
}

impl InboundRequest {
    /// Buffer `request`, rejecting bodies larger than `limit` bytes.
    pub async fn read(request: Request<Body>, limit: usize) -> Result<Self, GatewayError> {
        let (parts, body) = request.into_parts();

        let declared = parts
            .headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok());
        if declared.is_some_and(|len| len > limit) {
            return Err(GatewayError::BodyTooLarge { limit });
        }

        let body = axum::body::to_bytes(body, limit)
            .await
            .map_err(|e| {
                let inner = e.into_inner();
                if exceeds_limit(&*inner) {
                    GatewayError::BodyTooLarge { limit }
                } else {
                    GatewayError::BodyRead(inner.to_string())
                }
            })?;

        Ok(Self::from_parts(parts.method, parts.uri, parts.headers, body))
    }

    pub fn from_parts(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        let query = Query::<HashMap<String, String>>::try_from_uri(&uri)
            .map(|Query(q)| q)
            .unwrap_or_default();

        Self {
            method,
            uri,
            query,
            headers,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Decoded query parameter value.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Header value, if present and visible ASCII.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|v| v.to_str().ok())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn body_json(&self) -> Result<serde_json::Value, GatewayError> {
        serde_json::from_slice(&self.body).map_err(GatewayError::InvalidJson)
    }
}

/// Streamed or chunked bodies only hit the limit while buffering.
fn exceeds_limit(err: &(dyn StdError + 'static)) -> bool {
    std::iter::successors(Some(err), |e: &&(dyn StdError + 'static)| (*e).source())
        .any(|e| e.downcast_ref::<LengthLimitError>().is_some())
}

/// Where a credential was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Query,
    TokenHeader,
    Authorization,
}

/// The caller's upstream API token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    value: String,
    source: CredentialSource,
}

impl Credential {
    pub fn new(value: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// `Authorization` value in the scheme the upstream expects.
    pub fn authorization(&self) -> Result<HeaderValue, GatewayError> {
        let mut value = HeaderValue::from_str(&format!("token {}", self.value))
            .map_err(|_| GatewayError::InvalidToken)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Find the caller's credential: `token` query parameter, then `X-ZT-Token`,
/// then `Authorization`. Empty values count as absent.
pub fn extract_credential(request: &InboundRequest) -> Option<Credential> {
    if let Some(token) = request.query("token").filter(|t| !t.is_empty()) {
        return Some(Credential::new(token, CredentialSource::Query));
    }

    if let Some(token) = request
        .header(&X_ZT_TOKEN)
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return Some(Credential::new(token, CredentialSource::TokenHeader));
    }

    request
        .header(AUTHORIZATION)
        .map(parse_authorization)
        .filter(|t| !t.is_empty())
        .map(|t| Credential::new(t, CredentialSource::Authorization))
}

/// `Bearer <v>` yields `v`; otherwise a leading `token ` is stripped and the
/// remainder (or the raw value) is used. Both schemes match case-insensitively.
fn parse_authorization(raw: &str) -> &str {
    let raw = raw.trim();

    if let Some((scheme, value)) = raw.split_once(char::is_whitespace) {
        if scheme.eq_ignore_ascii_case("bearer") {
            return value.trim();
        }
    }

    match raw.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("token ") => raw[6..].trim(),
        _ => raw,
    }
}

/// Suffix appended to the upstream base URL. Always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamPath(String);

impl UpstreamPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build from a route template that is known to be slash-prefixed.
    pub(crate) fn from_template(path: String) -> Self {
        debug_assert!(path.starts_with('/'));
        Self(path)
    }
}

impl fmt::Display for UpstreamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accept `raw` unchanged when it is slash-prefixed.
pub fn normalize_path(raw: Option<&str>) -> Option<UpstreamPath> {
    raw.filter(|p| p.starts_with('/'))
        .map(|p| UpstreamPath(p.to_string()))
}
