//! CORS headers for the API surface.
//!
//! The gateway is a public, credential-in-request API: every response under
//! `/api` (success, rejection, upstream error, preflight) carries the same
//! fixed header set. Values are rendered once at startup.

use axum::{
    extract::{Request, State},
    http::{
        header::{
            InvalidHeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderMap, HeaderValue, StatusCode,
    },
    middleware::Next,
    response::Response,
};

use crate::config::CorsConfig;

/// Pre-rendered CORS header values.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsPolicy {
    pub fn from_config(config: &CorsConfig) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            allow_origin: HeaderValue::from_str(&config.allow_origin)?,
            allow_methods: HeaderValue::from_str(&config.allow_methods.join(","))?,
            allow_headers: HeaderValue::from_str(&config.allow_headers.join(", "))?,
        })
    }

    /// Insert the policy headers, replacing any existing values.
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }
}

/// Middleware stamping the policy onto every response of the wrapped routes.
pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    policy.apply(response.headers_mut());
    response
}

/// Preflight answer: no body, no upstream call. Headers come from the middleware.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
