//! Prometheus metrics for the admin notification gateway.
//!
//! - Sends accepted / not accepted by the push gateway, per target kind
//! - Role ids rejected before dispatch
//! - Gateway call latency

mod helpers;

pub use helpers::{encode_metrics, DispatchMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, HistogramVec,
    IntCounter, IntCounterVec,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "admin_notification";

lazy_static! {
    /// Messages accepted by the gateway, by target (`recipient`, `broadcast`, `role`)
    pub static ref NOTIFICATIONS_SENT_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_sent_total", METRIC_PREFIX),
        "Push messages accepted by the gateway",
        &["target"]
    ).unwrap();

    /// Messages the gateway rejected or failed to send, by target
    pub static ref NOTIFICATIONS_FAILED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_failed_total", METRIC_PREFIX),
        "Push messages not accepted by the gateway",
        &["target"]
    ).unwrap();

    /// Role ids in a role-targeted request that were not integers
    pub static ref ROLE_IDS_REJECTED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_role_ids_rejected_total", METRIC_PREFIX),
        "Role ids skipped because they could not be parsed"
    ).unwrap();

    /// Gateway call latency in seconds, by target
    pub static ref DISPATCH_LATENCY_SECONDS: HistogramVec = register_histogram_vec!(
        format!("{}_dispatch_latency_seconds", METRIC_PREFIX),
        "Push gateway call latency",
        &["target"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    ).unwrap();
}
