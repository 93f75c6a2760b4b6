//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - External services (indexer, debrid providers, metadata, link resolution)
//! - Search and stream composition outcomes

use std::time::Instant;

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bgtrackers_external_service_duration_seconds",
            "Duration of external service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["service", "operation"],
    )
    .unwrap()
});

/// External service requests total.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bgtrackers_external_service_requests_total",
            "Total external service requests",
        ),
        &["service", "operation", "status"], // status: "success", "error"
    )
    .unwrap()
});

/// Download-link resolutions by outcome.
pub static LINK_RESOLUTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bgtrackers_link_resolutions_total",
            "Download links resolved to an info hash",
        ),
        &["outcome"], // "magnet", "torrent", "failed"
    )
    .unwrap()
});

/// Hashes reported cached, per provider.
pub static DEBRID_CACHED_HASHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bgtrackers_debrid_cached_hashes_total",
            "Hashes reported as instantly available",
        ),
        &["provider"],
    )
    .unwrap()
});

// =============================================================================
// Search / Stream Metrics
// =============================================================================

/// Search results returned from the indexer.
pub static SEARCH_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bgtrackers_search_results",
            "Number of search results returned per query",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
        &[],
    )
    .unwrap()
});

/// Stream entries returned per request.
pub static STREAMS_RETURNED: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bgtrackers_streams_returned",
            "Number of stream entries returned per request",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
        &[],
    )
    .unwrap()
});

/// Requests answered with the "no results" placeholder.
pub static EMPTY_RESPONSES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "bgtrackers_empty_responses_total",
        "Stream requests answered with the no-results placeholder",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Record the outcome and latency of one external call.
pub fn record_external_call(service: &str, operation: &str, started: Instant, success: bool) {
    EXTERNAL_SERVICE_DURATION
        .with_label_values(&[service, operation])
        .observe(started.elapsed().as_secs_f64());
    EXTERNAL_SERVICE_REQUESTS
        .with_label_values(&[service, operation, if success { "success" } else { "error" }])
        .inc();
}

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // External services
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
        Box::new(LINK_RESOLUTIONS.clone()),
        Box::new(DEBRID_CACHED_HASHES.clone()),
        // Search / streams
        Box::new(SEARCH_RESULTS.clone()),
        Box::new(STREAMS_RETURNED.clone()),
        Box::new(EMPTY_RESPONSES.clone()),
    ]
}
