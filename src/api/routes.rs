use axum::{
    routing::{get, post},
    Router,
};

use crate::admin::{broadcast, info, preload, send_test, send_to_roles};
use crate::server::AppState;

use super::health::health;
use super::metrics::prometheus_metrics;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health & Metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        // Admin notification endpoints
        .route("/AdminNotification", post(info))
        .route("/AdminNotification/", post(info))
        .route("/AdminNotification/sendTest", get(send_test))
        .route("/AdminNotification/broadcast", get(broadcast))
        .route("/AdminNotification/preload", get(preload))
        .route("/AdminNotification/sendToRoles", post(send_to_roles))
}
