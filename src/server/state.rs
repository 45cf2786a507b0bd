use std::sync::Arc;

use crate::admin::{AdminNotifier, TopicNames};
use crate::config::Settings;
use crate::directory::{create_directory, RoleDirectory};
use crate::dispatch::{create_gateway, NotificationGateway};
use crate::error::Result;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub gateway: Arc<dyn NotificationGateway>,
    pub directory: Arc<dyn RoleDirectory>,
    pub notifier: Arc<AdminNotifier>,
}

impl AppState {
    /// Build state around already constructed collaborators.
    pub fn new(
        settings: Settings,
        gateway: Arc<dyn NotificationGateway>,
        directory: Arc<dyn RoleDirectory>,
    ) -> Self {
        let notifier = Arc::new(AdminNotifier::new(
            gateway.clone(),
            directory.clone(),
            TopicNames::from(&settings.gateway),
        ));

        Self {
            settings: Arc::new(settings),
            gateway,
            directory,
            notifier,
        }
    }

    /// Build state with the gateway and directory backends named in configuration.
    pub async fn from_settings(settings: Settings) -> Result<Self> {
        let gateway = create_gateway(&settings.gateway).await?;
        let directory = create_directory(&settings.directory).await?;
        Ok(Self::new(settings, gateway, directory))
    }
}
