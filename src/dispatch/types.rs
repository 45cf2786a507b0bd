use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Free-form key/value payload attached to a push message.
pub type ExtraData = HashMap<String, String>;

/// Opaque token the gateway hands back for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Receipt(String);

impl Receipt {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a push message goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushTarget<'a> {
    /// A single device registration token
    Recipient(&'a str),
    /// Every subscriber of a named topic
    Topic(&'a str),
}

impl PushTarget<'_> {
    /// Label used for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            PushTarget::Recipient(_) => "recipient",
            PushTarget::Topic(_) => "topic",
        }
    }
}

/// Visible part of a push message.
#[derive(Debug, Clone, Serialize)]
pub struct PushNotification<'a> {
    pub title: &'a str,
    pub body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a ExtraData>,
}

/// Unexpected gateway faults.
///
/// An ordinary rejection by the gateway is not an error: the send methods
/// return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Push gateway transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Push gateway misconfigured: {0}")]
    Config(String),
}

/// Outbound push notification gateway.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Send to one device. `Ok(None)` when the gateway did not accept the message.
    async fn send_to_recipient(
        &self,
        recipient_token: &str,
        title: &str,
        body: &str,
        data: Option<&ExtraData>,
    ) -> Result<Option<Receipt>, DispatchError>;

    /// Send to every subscriber of `topic`. `Ok(None)` when the gateway did not
    /// accept the message.
    async fn send_to_topic(
        &self,
        topic: &str,
        title: &str,
        body: &str,
        data: Option<&ExtraData>,
    ) -> Result<Option<Receipt>, DispatchError>;

    /// Backend name, for logs
    fn backend(&self) -> &'static str;
}
