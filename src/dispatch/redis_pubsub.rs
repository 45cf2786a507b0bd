//! Redis pub/sub gateway.
//!
//! Publishes each push message as JSON on `{prefix}:topic:{topic}` or
//! `{prefix}:device:{token}` for a downstream push worker to fan out.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::Serialize;
use uuid::Uuid;

use crate::config::RedisConfig;

use super::{DispatchError, ExtraData, NotificationGateway, PushNotification, PushTarget, Receipt};

/// Message body published on the channel
#[derive(Debug, Serialize)]
struct PushEnvelope<'a> {
    id: Uuid,
    #[serde(flatten)]
    notification: PushNotification<'a>,
    sent_at: DateTime<Utc>,
}

pub struct RedisPubSubGateway {
    connection: ConnectionManager,
    channel_prefix: String,
}

impl RedisPubSubGateway {
    pub async fn connect(config: &RedisConfig) -> Result<Self, DispatchError> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection = client.get_connection_manager().await?;

        tracing::info!(prefix = %config.channel_prefix, "Connected Redis push gateway");

        Ok(Self {
            connection,
            channel_prefix: config.channel_prefix.clone(),
        })
    }

    async fn deliver(
        &self,
        target: PushTarget<'_>,
        notification: PushNotification<'_>,
    ) -> Result<Option<Receipt>, DispatchError> {
        let channel = channel_name(&self.channel_prefix, target);
        let envelope = PushEnvelope {
            id: Uuid::new_v4(),
            notification,
            sent_at: Utc::now(),
        };
        let payload = serde_json::to_string(&envelope)?;

        let mut conn = self.connection.clone();
        let receivers: i64 = conn.publish(&channel, payload).await?;

        tracing::debug!(
            channel = %channel,
            receivers,
            message_id = %envelope.id,
            "Published push message"
        );

        Ok(Some(Receipt::new(envelope.id.to_string())))
    }
}

fn channel_name(prefix: &str, target: PushTarget<'_>) -> String {
    match target {
        PushTarget::Recipient(token) => format!("{}:device:{}", prefix, token),
        PushTarget::Topic(topic) => format!("{}:topic:{}", prefix, topic),
    }
}

#[async_trait]
impl NotificationGateway for RedisPubSubGateway {
    async fn send_to_recipient(
        &self,
        recipient_token: &str,
        title: &str,
        body: &str,
        data: Option<&ExtraData>,
    ) -> Result<Option<Receipt>, DispatchError> {
        self.deliver(
            PushTarget::Recipient(recipient_token),
            PushNotification { title, body, data },
        )
        .await
    }

    async fn send_to_topic(
        &self,
        topic: &str,
        title: &str,
        body: &str,
        data: Option<&ExtraData>,
    ) -> Result<Option<Receipt>, DispatchError> {
        self.deliver(PushTarget::Topic(topic), PushNotification { title, body, data })
            .await
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        assert_eq!(
            channel_name("push", PushTarget::Topic("all_users")),
            "push:topic:all_users"
        );
        assert_eq!(
            channel_name("push", PushTarget::Recipient("abc123")),
            "push:device:abc123"
        );
    }

    #[test]
    fn test_envelope_flattens_notification() {
        let envelope = PushEnvelope {
            id: Uuid::nil(),
            notification: PushNotification {
                title: "Exam Alert",
                body: "New exam posted",
                data: None,
            },
            sent_at: Utc::now(),
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["title"], "Exam Alert");
        assert_eq!(value["body"], "New exam posted");
        assert!(value.get("sent_at").is_some());
    }
}
