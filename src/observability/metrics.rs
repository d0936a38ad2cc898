//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by route, method, status
//! - `gateway_request_duration_seconds` (histogram): latency by route, method
//! - `gateway_upstream_errors_total` (counter): failed relays by route
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   exporter every call is a no-op
//! - Route labels are the fixed route names, never raw paths

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished request.
pub fn record_request(route: &'static str, method: &str, status: u16, start: Instant) {
    let method = method.to_string();
    metrics::counter!(
        "gateway_requests_total",
        "route" => route,
        "method" => method.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "gateway_request_duration_seconds",
        "route" => route,
        "method" => method
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a relay that could not be completed.
pub fn record_upstream_error(route: &'static str) {
    metrics::counter!("gateway_upstream_errors_total", "route" => route).increment(1);
}
