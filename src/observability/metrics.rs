//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_upstream_requests_total` (counter): upstream calls by method, status
//! - `gateway_upstream_duration_seconds` (histogram): time to upstream response head
//! - `gateway_upstream_failures_total` (counter): transport failures by method
//! - `gateway_rejections_total` (counter): requests answered with a gateway error, by kind
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_upstream(method: &Method, status: u16, start: Instant) {
    let method = method.to_string();
    counter!(
        "gateway_upstream_requests_total",
        "method" => method.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_upstream_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_failure(method: &Method) {
    counter!("gateway_upstream_failures_total", "method" => method.to_string()).increment(1);
}

pub fn record_rejection(kind: &'static str) {
    counter!("gateway_rejections_total", "kind" => kind).increment(1);
}
