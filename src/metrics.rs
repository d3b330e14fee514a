//! Prometheus metrics for request counts and payload generation latency.
//!
//! Without an installed recorder every macro call here is a no-op, so
//! handlers and tests can record unconditionally.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::{ApiError, Result};

// === Metric Name Constants ===

/// Requests served counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Payload generation latency metric name.
pub const METRIC_GENERATION_LATENCY: &str = "payload_generation_ms";
/// Filter fallbacks counter metric name.
pub const METRIC_FILTER_FALLBACKS: &str = "filter_fallbacks_total";

/// Install the global Prometheus recorder and describe all metrics.
/// Call this once at startup.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ApiError::Metrics(e.to_string()))?;

    describe_counter!(
        METRIC_HTTP_REQUESTS,
        "Total number of API requests served, by endpoint"
    );
    describe_histogram!(
        METRIC_GENERATION_LATENCY,
        "Time to generate a mock payload in milliseconds"
    );
    describe_counter!(
        METRIC_FILTER_FALLBACKS,
        "Requests whose metric/gene filter fell back to the default"
    );

    debug!("Metrics initialized");
    Ok(handle)
}

/// Increment the request counter for `endpoint`.
pub fn inc_requests(endpoint: &'static str) {
    counter!(METRIC_HTTP_REQUESTS, "endpoint" => endpoint).increment(1);
}

/// Increment the fallback counter for the filter named `param`.
pub fn inc_filter_fallbacks(param: &'static str) {
    counter!(METRIC_FILTER_FALLBACKS, "param" => param).increment(1);
}

/// RAII guard timing one payload generation.
/// Records latency for its endpoint when dropped.
pub struct GenerationTimer {
    start: Instant,
    endpoint: &'static str,
}

impl GenerationTimer {
    /// Start timing a payload for `endpoint`.
    pub fn start(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for GenerationTimer {
    fn drop(&mut self) {
        histogram!(METRIC_GENERATION_LATENCY, "endpoint" => self.endpoint).record(self.elapsed_ms());
    }
}
