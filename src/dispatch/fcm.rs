//! Firebase Cloud Messaging HTTP v1 gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::FcmConfig;

use super::{DispatchError, ExtraData, NotificationGateway, PushNotification, PushTarget, Receipt};

#[derive(Debug, Deserialize)]
struct SendResponse {
    /// `projects/{project}/messages/{message_id}`
    name: String,
}

pub struct FcmGateway {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
}

impl FcmGateway {
    pub fn new(config: &FcmConfig) -> Result<Self, DispatchError> {
        if config.project_id.is_empty() {
            return Err(DispatchError::Config(
                "gateway.fcm.project_id must be set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let endpoint = format!(
            "{}/v1/projects/{}/messages:send",
            config.base_url.trim_end_matches('/'),
            config.project_id
        );

        if config.access_token.is_none() {
            tracing::warn!("FCM access token not configured, requests will be unauthenticated");
        }

        Ok(Self {
            client,
            endpoint,
            access_token: config.access_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn deliver(
        &self,
        target: PushTarget<'_>,
        notification: PushNotification<'_>,
    ) -> Result<Option<Receipt>, DispatchError> {
        let message = build_message(target, &notification);

        let mut request = self.client.post(&self.endpoint).json(&message);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                target = target.kind(),
                detail = %detail,
                "FCM rejected message"
            );
            return Ok(None);
        }

        let sent: SendResponse = response.json().await?;
        Ok(Some(Receipt::new(sent.name)))
    }
}

/// Build the `{"message": {...}}` request body.
fn build_message(target: PushTarget<'_>, notification: &PushNotification<'_>) -> Value {
    let mut message = json!({
        "notification": {
            "title": notification.title,
            "body": notification.body,
        }
    });

    match target {
        PushTarget::Recipient(token) => message["token"] = json!(token),
        PushTarget::Topic(topic) => message["topic"] = json!(topic),
    }

    if let Some(data) = notification.data {
        message["data"] = json!(data);
    }

    json!({ "message": message })
}

#[async_trait]
impl NotificationGateway for FcmGateway {
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
        "fcm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(project_id: &str) -> FcmConfig {
        FcmConfig {
            base_url: "https://fcm.example.test/".to_string(),
            project_id: project_id.to_string(),
            access_token: Some("token".to_string()),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_endpoint_from_config() {
        let gateway = FcmGateway::new(&config("ors-project")).unwrap();
        assert_eq!(
            gateway.endpoint(),
            "https://fcm.example.test/v1/projects/ors-project/messages:send"
        );
    }

    #[test]
    fn test_missing_project_id_is_rejected() {
        let result = FcmGateway::new(&config(""));
        assert!(matches!(result, Err(DispatchError::Config(_))));
    }

    #[test]
    fn test_topic_message_shape() {
        let notification = PushNotification {
            title: "Exam Alert",
            body: "New exam posted",
            data: None,
        };
        let message = build_message(PushTarget::Topic("role_3"), &notification);

        assert_eq!(message["message"]["topic"], "role_3");
        assert_eq!(message["message"]["notification"]["title"], "Exam Alert");
        assert!(message["message"].get("token").is_none());
        assert!(message["message"].get("data").is_none());
    }

    #[test]
    fn test_recipient_message_carries_data() {
        let mut data = ExtraData::new();
        data.insert("screen".to_string(), "exam".to_string());
        let notification = PushNotification {
            title: "Hi",
            body: "There",
            data: Some(&data),
        };
        let message = build_message(PushTarget::Recipient("device-token"), &notification);

        assert_eq!(message["message"]["token"], "device-token");
        assert_eq!(message["message"]["data"]["screen"], "exam");
    }
}
