//! Outbound push notification gateways.
//!
//! Every backend implements [`NotificationGateway`]:
//!
//! - `FcmGateway`: Firebase Cloud Messaging HTTP v1 API
//! - `RedisPubSubGateway`: publishes to Redis channels for a push worker
//! - `LogGateway`: logs the message and hands back a synthetic receipt (default)
//!
//! Use `create_gateway()` to build the backend named in configuration.

mod fcm;
mod log_gateway;
mod redis_pubsub;
mod types;

use std::sync::Arc;

use crate::config::GatewayConfig;

pub use fcm::FcmGateway;
pub use log_gateway::LogGateway;
pub use redis_pubsub::RedisPubSubGateway;
pub use types::{
    DispatchError, ExtraData, NotificationGateway, PushNotification, PushTarget, Receipt,
};

/// Create the push gateway selected by `gateway.backend`.
///
/// - `"fcm"`: `FcmGateway`
/// - `"redis"`: `RedisPubSubGateway` (connects eagerly)
/// - `"log"` or anything else: `LogGateway`
pub async fn create_gateway(
    config: &GatewayConfig,
) -> Result<Arc<dyn NotificationGateway>, DispatchError> {
    match config.backend.as_str() {
        "fcm" => {
            tracing::info!(backend = "fcm", project = %config.fcm.project_id, "Creating FCM gateway");
            Ok(Arc::new(FcmGateway::new(&config.fcm)?))
        }
        "redis" => {
            tracing::info!(backend = "redis", url = %config.redis.url, "Creating Redis gateway");
            Ok(Arc::new(RedisPubSubGateway::connect(&config.redis).await?))
        }
        "log" => {
            tracing::info!(backend = "log", "Creating log-only gateway");
            Ok(Arc::new(LogGateway::new()))
        }
        other => {
            tracing::warn!(
                backend = %other,
                "Unknown gateway backend, falling back to log-only gateway"
            );
            Ok(Arc::new(LogGateway::new()))
        }
    }
}
