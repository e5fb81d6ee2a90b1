//! Prometheus metrics for upstream fetches.
//!
//! The `metrics` macros are no-ops until a recorder is installed, so
//! library code records unconditionally and only the binary decides
//! whether to install one.

use std::time::{Duration, Instant};

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tracing::debug;

// === Metric Name Constants ===

/// Upstream fetch latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "upstream_fetch_latency_ms";
/// Upstream fetches counter metric name.
pub const METRIC_UPSTREAM_FETCHES: &str = "upstream_fetches_total";
/// Upstream failures counter metric name.
pub const METRIC_UPSTREAM_FAILURES: &str = "upstream_fetch_failures_total";

/// How often histogram buckets are drained when nothing scrapes `/metrics`.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Install the Prometheus recorder and describe all metrics.
/// Call this once at startup.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Drain the recorder's histogram buckets on a fixed interval.
///
/// `install_recorder` does not schedule upkeep itself; without this task
/// histogram samples accumulate until the next render.
pub fn spawn_upkeep(handle: PrometheusHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            handle.run_upkeep();
        }
    })
}

/// Register metric descriptions with the installed recorder.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Upstream river fetch latency in milliseconds"
    );
    describe_counter!(
        METRIC_UPSTREAM_FETCHES,
        "Total number of upstream river fetches"
    );
    describe_counter!(
        METRIC_UPSTREAM_FAILURES,
        "Total number of upstream river fetches that failed"
    );

    debug!("Metrics initialized");
}

/// Record upstream fetch latency for one river.
pub fn record_upstream_latency(start: Instant, river: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_UPSTREAM_LATENCY, "river" => river.to_string()).record(latency_ms);
}

/// Increment upstream fetches counter.
pub fn inc_upstream_fetches() {
    counter!(METRIC_UPSTREAM_FETCHES).increment(1);
}

/// Increment upstream failures counter.
pub fn inc_upstream_failures(kind: &'static str) {
    counter!(METRIC_UPSTREAM_FAILURES, "kind" => kind).increment(1);
}
