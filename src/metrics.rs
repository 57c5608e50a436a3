//! Prometheus metrics for poll cycles and depth fetches.
//!
//! This module provides metrics for:
//! - Depth fetch latency and failures, per pair
//! - Poll cycle outcomes
//! - The latest forward and reverse factors

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use tracing::debug;

use crate::market::Pair;

// === Metric Name Constants ===

/// Depth fetch latency metric name.
pub const METRIC_DEPTH_FETCH_LATENCY: &str = "depth_fetch_latency_ms";
/// Depth fetch failures counter metric name.
pub const METRIC_DEPTH_FETCH_FAILURES: &str = "depth_fetch_failures_total";
/// Cycles started counter metric name.
pub const METRIC_CYCLES_STARTED: &str = "cycles_started_total";
/// Cycles completed counter metric name.
pub const METRIC_CYCLES_COMPLETED: &str = "cycles_completed_total";
/// Cycles skipped counter metric name.
pub const METRIC_CYCLES_SKIPPED: &str = "cycles_skipped_total";
/// Forward factor gauge metric name.
pub const METRIC_FORWARD_FACTOR: &str = "arb_forward_factor";
/// Reverse factor gauge metric name.
pub const METRIC_REVERSE_FACTOR: &str = "arb_reverse_factor";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_DEPTH_FETCH_LATENCY,
        "Depth request latency in milliseconds"
    );

    describe_counter!(
        METRIC_DEPTH_FETCH_FAILURES,
        "Total number of failed depth requests"
    );
    describe_counter!(METRIC_CYCLES_STARTED, "Total number of poll cycles started");
    describe_counter!(
        METRIC_CYCLES_COMPLETED,
        "Total number of poll cycles that produced a report"
    );
    describe_counter!(
        METRIC_CYCLES_SKIPPED,
        "Total number of poll cycles skipped after a fetch failure"
    );

    describe_gauge!(METRIC_FORWARD_FACTOR, "Latest forward arbitrage factor");
    describe_gauge!(METRIC_REVERSE_FACTOR, "Latest reverse arbitrage factor");

    debug!("Metrics initialized");
}

/// Record depth fetch latency.
pub fn record_depth_fetch_latency(start: Instant, pair: Pair) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_DEPTH_FETCH_LATENCY, "pair" => pair.symbol()).record(latency_ms);
}

/// Increment depth fetch failures counter.
pub fn inc_fetch_failures(pair: Pair) {
    counter!(METRIC_DEPTH_FETCH_FAILURES, "pair" => pair.symbol()).increment(1);
}

/// Increment cycles started counter.
pub fn inc_cycles_started() {
    counter!(METRIC_CYCLES_STARTED).increment(1);
}

/// Increment cycles completed counter.
pub fn inc_cycles_completed() {
    counter!(METRIC_CYCLES_COMPLETED).increment(1);
}

/// Increment cycles skipped counter.
pub fn inc_cycles_skipped() {
    counter!(METRIC_CYCLES_SKIPPED).increment(1);
}

/// Publish the latest factors.
pub fn set_factors(forward: f64, reverse: f64) {
    gauge!(METRIC_FORWARD_FACTOR).set(forward);
    gauge!(METRIC_REVERSE_FACTOR).set(reverse);
}

/// RAII guard for timing a depth fetch.
/// Records latency when dropped, including on early error returns.
pub struct LatencyTimer {
    start: Instant,
    pair: Pair,
}

impl LatencyTimer {
    /// Create a new latency timer for the given pair.
    pub fn new(pair: Pair) -> Self {
        Self {
            start: Instant::now(),
            pair,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_depth_fetch_latency(self.start, self.pair);
    }
}

/// Create a latency timer for a depth fetch.
pub fn timer_depth_fetch(pair: Pair) -> LatencyTimer {
    LatencyTimer::new(pair)
}
