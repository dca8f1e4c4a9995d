// Prometheus metrics definitions for the Atelier backend.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // ── Gauges ───────────────────────────────────────────────────────

    /// Elements persisted so far (seeded from the DB count at startup).
    pub static ref ELEMENTS_DISCOVERED: IntGauge =
        IntGauge::new("atelier_elements_discovered", "Elements persisted so far").unwrap();

    // ── Counters ─────────────────────────────────────────────────────

    /// Combine requests, by outcome (pair_hit, text_hit, created, created_fallback).
    pub static ref COMBINATIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("atelier_combinations_total", "Combine requests by outcome"),
        &["outcome"],
    )
    .unwrap();

    /// Generation attempts, by result (ok, parse_failed, transport_error).
    pub static ref GENERATION_ATTEMPTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("atelier_generation_attempts_total", "Generation attempts by result"),
        &["result"],
    )
    .unwrap();

    // ── Histograms ───────────────────────────────────────────────────

    /// Per-attempt generation call duration in seconds.
    pub static ref GENERATION_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "atelier_generation_duration_seconds",
            "Generation call duration in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
    )
    .unwrap();
}

/// Register all metrics with the custom registry. Call once at startup.
pub fn register_metrics() {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(ELEMENTS_DISCOVERED.clone()),
        Box::new(COMBINATIONS_TOTAL.clone()),
        Box::new(GENERATION_ATTEMPTS_TOTAL.clone()),
        Box::new(GENERATION_DURATION_SECONDS.clone()),
    ];

    for c in collectors {
        REGISTRY.register(c).expect("failed to register metric");
    }
}

/// Serialize all registered metrics to the Prometheus text exposition format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
