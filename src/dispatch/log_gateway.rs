use async_trait::async_trait;
use uuid::Uuid;

use super::{DispatchError, ExtraData, NotificationGateway, Receipt};

/// Development gateway: accepts everything and only writes a log line.
#[derive(Debug, Default)]
pub struct LogGateway;

impl LogGateway {
    pub fn new() -> Self {
        Self
    }

    fn receipt() -> Receipt {
        Receipt::new(format!("log-{}", Uuid::new_v4()))
    }
}

#[async_trait]
impl NotificationGateway for LogGateway {
    async fn send_to_recipient(
        &self,
        recipient_token: &str,
        title: &str,
        body: &str,
        data: Option<&ExtraData>,
    ) -> Result<Option<Receipt>, DispatchError> {
        let receipt = Self::receipt();
        tracing::info!(
            recipient = %recipient_token,
            title = %title,
            body = %body,
            data = ?data,
            receipt = %receipt,
            "Push to recipient (log gateway)"
        );
        Ok(Some(receipt))
    }

    async fn send_to_topic(
        &self,
        topic: &str,
        title: &str,
        body: &str,
        data: Option<&ExtraData>,
    ) -> Result<Option<Receipt>, DispatchError> {
        let receipt = Self::receipt();
        tracing::info!(
            topic = %topic,
            title = %title,
            body = %body,
            data = ?data,
            receipt = %receipt,
            "Push to topic (log gateway)"
        );
        Ok(Some(receipt))
    }

    fn backend(&self) -> &'static str {
        "log"
    }
}
