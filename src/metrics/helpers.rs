//! Metrics helper structs for convenient metric recording

use std::time::Duration;

use prometheus::{Encoder, TextEncoder};

use super::{
    DISPATCH_LATENCY_SECONDS, NOTIFICATIONS_FAILED_TOTAL, NOTIFICATIONS_SENT_TOTAL,
    ROLE_IDS_REJECTED_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording gateway dispatch metrics
pub struct DispatchMetrics;

impl DispatchMetrics {
    /// Record a message the gateway accepted
    pub fn record_sent(target: &str) {
        NOTIFICATIONS_SENT_TOTAL.with_label_values(&[target]).inc();
    }

    /// Record a message the gateway did not accept
    pub fn record_failed(target: &str) {
        NOTIFICATIONS_FAILED_TOTAL.with_label_values(&[target]).inc();
    }

    /// Record a role id that could not be parsed
    pub fn record_rejected_role_id() {
        ROLE_IDS_REJECTED_TOTAL.inc();
    }

    /// Record gateway call latency
    pub fn observe_latency(target: &str, elapsed: Duration) {
        DISPATCH_LATENCY_SECONDS
            .with_label_values(&[target])
            .observe(elapsed.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_encode() {
        DispatchMetrics::record_sent("broadcast");
        DispatchMetrics::record_failed("role");
        DispatchMetrics::record_rejected_role_id();
        DispatchMetrics::observe_latency("recipient", Duration::from_millis(12));

        let output = encode_metrics().unwrap();
        assert!(output.contains("admin_notification_sent_total"));
        assert!(output.contains("admin_notification_role_ids_rejected_total"));
    }
}
