//! Upstream dispatch and response relay.
//!
//! # Responsibilities
//! - Send exactly one request per `ForwardSpec` to `<base_url><path>`
//! - Authenticate with `Authorization: token <credential>`
//! - Relay status verbatim with an allow-listed header set
//! - Stream the upstream body back without buffering or re-encoding
//!
//! # Design Decisions
//! - No retries and no timeout beyond the client default
//! - Transport failures become a 500 JSON error, never a panic
//! - Dropping the returned future cancels the in-flight upstream call

use std::time::Instant;

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, ETAG},
        HeaderMap, HeaderName, HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
};

use crate::config::UpstreamConfig;
use crate::error::GatewayError;
use crate::http::body::ForwardBody;
use crate::http::request::{Credential, UpstreamPath};
use crate::observability::metrics;

/// Upstream response headers relayed to the caller.
pub const RELAYED_HEADERS: [HeaderName; 3] = [CONTENT_TYPE, CONTENT_LENGTH, ETAG];

/// A fully prepared upstream request.
#[derive(Debug)]
pub struct ForwardSpec {
    pub method: Method,
    pub path: UpstreamPath,
    pub credential: Credential,
    pub headers: HeaderMap,
    pub body: Option<ForwardBody>,
}

/// Client for the fixed upstream API.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    base_url: String,
}

impl Forwarder {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute upstream URL for `path`.
    pub fn url_for(&self, path: &UpstreamPath) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Dispatch `spec` and translate the upstream response.
    pub async fn forward(&self, spec: ForwardSpec) -> Result<Response, GatewayError> {
        let ForwardSpec {
            method,
            path,
            credential,
            mut headers,
            body,
        } = spec;

        headers.insert(AUTHORIZATION, credential.authorization()?);
        if body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let url = self.url_for(&path);
        tracing::debug!(
            method = %method,
            upstream_path = %path,
            credential_source = ?credential.source(),
            has_body = body.is_some(),
            "Forwarding to upstream"
        );

        let mut request = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            request = request.body(body.into_bytes());
        }

        let start = Instant::now();
        let upstream = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_upstream_failure(&method);
                return Err(GatewayError::Upstream(e));
            }
        };

        let status = upstream.status();
        metrics::record_upstream(&method, status.as_u16(), start);
        tracing::debug!(
            method = %method,
            upstream_path = %path,
            status = %status,
            latency_ms = start.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        Ok(relay(upstream))
    }
}

/// Translate an upstream response for the caller.
fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    if status == StatusCode::NO_CONTENT {
        return StatusCode::NO_CONTENT.into_response();
    }

    let headers = relayed_headers(upstream.headers());
    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Copy only the allow-listed headers.
fn relayed_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for name in RELAYED_HEADERS.iter() {
        if let Some(value) = upstream.get(name) {
            headers.insert(name.clone(), value.clone());
        }
    }
    headers
}
