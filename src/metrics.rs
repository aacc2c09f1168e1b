//! Prometheus metrics for calculation volume and request latency.
//!
//! This module provides metrics for:
//! - Calculations performed, by operation
//! - Calculations rejected, by operation
//! - Wagers settled
//! - HTTP request latency

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Calculations performed counter metric name.
pub const METRIC_CALCULATIONS: &str = "calculations_total";
/// Calculations rejected counter metric name.
pub const METRIC_CALCULATION_FAILURES: &str = "calculation_failures_total";
/// Settled wager records counter metric name.
pub const METRIC_SETTLEMENT_RECORDS: &str = "settlement_records_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Calculation kinds, used as the `operation` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    /// Payout from odds and stake.
    Payout,
    /// Stake from odds and payout.
    Stake,
    /// Odds from stake and payout.
    Odds,
    /// Fee-adjusted odds.
    EffectiveOdds,
    /// Settlement aggregation.
    Settlement,
}

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_CALCULATIONS, "Total number of calculations performed");
    describe_counter!(
        METRIC_CALCULATION_FAILURES,
        "Total number of calculations rejected with a validation error"
    );
    describe_counter!(
        METRIC_SETTLEMENT_RECORDS,
        "Total number of graded wagers aggregated"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus recorder and return a handle for rendering.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record the outcome of a calculation.
pub fn record_calculation(operation: Operation, ok: bool) {
    let label: &'static str = operation.into();
    if ok {
        counter!(METRIC_CALCULATIONS, "operation" => label).increment(1);
    } else {
        counter!(METRIC_CALCULATION_FAILURES, "operation" => label).increment(1);
    }
}

/// Increment settled records counter.
pub fn inc_settlement_records(count: usize) {
    counter!(METRIC_SETTLEMENT_RECORDS).increment(count as u64);
}

/// Record HTTP request latency.
pub fn record_http_latency(latency_ms: f64, endpoint: &str) {
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
}

/// RAII guard for timing HTTP requests.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given endpoint.
    pub fn new(endpoint: &'static str) -> Self {
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

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_http_latency(self.elapsed_ms(), self.endpoint);
    }
}
