//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Sessions (outcomes, in-flight count)
//! - Emitted stream events by type
//! - Background generation jobs (duration by result)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Session Metrics
// =============================================================================

/// Finished sessions by outcome.
pub static SESSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("chatstream_sessions_total", "Total finished streaming sessions"),
        &["outcome"], // "completed", "failed"
    )
    .unwrap()
});

/// Sessions currently streaming.
pub static SESSIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "chatstream_sessions_active",
        "Number of sessions currently streaming",
    )
    .unwrap()
});

/// Session duration in seconds.
pub static SESSION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "chatstream_session_duration_seconds",
            "Wall-clock duration of a streaming session",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["outcome"],
    )
    .unwrap()
});

// =============================================================================
// Event Metrics
// =============================================================================

/// Events successfully written to a sink, by event type.
pub static EVENTS_EMITTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("chatstream_events_emitted_total", "Stream events written"),
        &["type"],
    )
    .unwrap()
});

// =============================================================================
// Background Job Metrics
// =============================================================================

/// Background job duration in seconds, from start to join.
pub static JOB_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "chatstream_job_duration_seconds",
            "Duration of background generation jobs",
        )
        .buckets(vec![0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["result"], // "success", "failed", "timeout", "panicked", "aborted"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SESSIONS_TOTAL.clone()),
        Box::new(SESSIONS_ACTIVE.clone()),
        Box::new(SESSION_DURATION.clone()),
        Box::new(EVENTS_EMITTED.clone()),
        Box::new(JOB_DURATION.clone()),
    ]
}
