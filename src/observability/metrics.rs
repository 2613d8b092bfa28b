//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirect_requests_total` (counter): redirects by method and scheme.
//!   Extension methods share the `other` label.
//! - `redirect_request_duration_seconds` (histogram): handling latency
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled redirect.
pub fn record_redirect(method: &Method, scheme: &'static str, start: Instant) {
    metrics::counter!(
        "redirect_requests_total",
        "method" => method_label(method),
        "scheme" => scheme
    )
    .increment(1);
    metrics::histogram!("redirect_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::HEAD => "HEAD",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::CONNECT => "CONNECT",
        Method::OPTIONS => "OPTIONS",
        Method::TRACE => "TRACE",
        Method::PATCH => "PATCH",
        _ => "other",
    }
}
