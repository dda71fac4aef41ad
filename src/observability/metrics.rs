//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relay requests by outcome
//! - `relay_request_duration_seconds` (histogram): end-to-end relay latency
//! - `relay_queue_submissions_total` (counter): queue sends by outcome
//! - `relay_audit_appends_total` (counter): audit appends by outcome
//! - `relay_provisioning_total` (counter): log resource provisioning by resource, outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished relay request.
pub fn record_request(outcome: &'static str, start: Instant) {
    counter!("relay_requests_total", "outcome" => outcome).increment(1);
    histogram!("relay_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a queue submission attempt.
pub fn record_queue_submission(outcome: &'static str) {
    counter!("relay_queue_submissions_total", "outcome" => outcome).increment(1);
}

/// Record an audit append attempt.
pub fn record_audit_append(outcome: &'static str) {
    counter!("relay_audit_appends_total", "outcome" => outcome).increment(1);
}

/// Record a provisioning step.
pub fn record_provisioning(resource: &'static str, outcome: &'static str) {
    counter!("relay_provisioning_total", "resource" => resource, "outcome" => outcome)
        .increment(1);
}
