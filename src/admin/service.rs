//! Admin notification operations.
//!
//! Every operation returns an [`AdminResponse`]. Faults from the gateway or
//! the role directory are folded into a failure envelope here and never leave
//! as an HTTP error.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::config::GatewayConfig;
use crate::directory::{RequestContext, RoleDirectory, RoleOption};
use crate::dispatch::{DispatchError, NotificationGateway, Receipt};
use crate::error::AdminError;
use crate::metrics::DispatchMetrics;

use super::envelope::AdminResponse;
use super::models::{parse_role_id, BroadcastQuery, SendTestQuery, SendToRolesRequest};

const INFO_MESSAGE: &str = "Admin Notification Controller is ready";
const INFO_ENDPOINTS: &str = "Available: /sendTest, /broadcast, /sendToRoles";

/// Topic naming for broadcast and role-targeted sends
#[derive(Debug, Clone)]
pub struct TopicNames {
    pub broadcast: String,
    pub role_prefix: String,
}

impl TopicNames {
    pub fn role_topic(&self, role_id: i64) -> String {
        format!("{}{}", self.role_prefix, role_id)
    }
}

impl Default for TopicNames {
    fn default() -> Self {
        Self::from(&GatewayConfig::default())
    }
}

impl From<&GatewayConfig> for TopicNames {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            broadcast: config.broadcast_topic.clone(),
            role_prefix: config.role_topic_prefix.clone(),
        }
    }
}

/// Outcome of a role-targeted send, accumulated entry by entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoleDispatchSummary {
    /// Entries in the request
    pub requested: usize,
    /// Display names of roles the gateway accepted, in request order
    pub sent_to: Vec<String>,
    /// Display names of roles the gateway did not accept
    pub failed: Vec<String>,
    /// Entries that were not integer role ids
    pub rejected: Vec<String>,
}

impl RoleDispatchSummary {
    pub fn total_sent(&self) -> usize {
        self.sent_to.len()
    }
}

pub struct AdminNotifier {
    gateway: Arc<dyn NotificationGateway>,
    directory: Arc<dyn RoleDirectory>,
    topics: TopicNames,
}

impl AdminNotifier {
    pub fn new(
        gateway: Arc<dyn NotificationGateway>,
        directory: Arc<dyn RoleDirectory>,
        topics: TopicNames,
    ) -> Self {
        Self {
            gateway,
            directory,
            topics,
        }
    }

    /// Send a test notification to one device.
    #[tracing::instrument(name = "admin.send_test", skip(self, query))]
    pub async fn send_test(&self, query: SendTestQuery) -> AdminResponse {
        let result: Result<AdminResponse, AdminError> = async {
            let (token, title, body) = match (query.fcm_token, query.title, query.body) {
                (Some(token), Some(title), Some(body)) => (token, title, body),
                _ => {
                    return Err(AdminError::Validation(
                        "fcmToken, title and body are required".to_string(),
                    ))
                }
            };

            let started = Instant::now();
            let outcome = self
                .gateway
                .send_to_recipient(&token, &title, &body, None)
                .await;
            let receipt = record_outcome("recipient", started, outcome)?;

            Ok(match receipt {
                Some(receipt) => {
                    tracing::info!(receipt = %receipt, "Test notification sent");
                    AdminResponse::ok("Test notification sent successfully").with_data(receipt)
                }
                None => AdminResponse::failure("Failed to send test notification"),
            })
        }
        .await;

        fold(result, "Error")
    }

    /// Send to every user through the broadcast topic.
    #[tracing::instrument(name = "admin.broadcast", skip(self, query))]
    pub async fn broadcast(&self, query: BroadcastQuery) -> AdminResponse {
        let result: Result<AdminResponse, AdminError> = async {
            let (title, body) = require_title_and_body(query.title, query.body)?;
            let topic = &self.topics.broadcast;

            let started = Instant::now();
            let outcome = self.gateway.send_to_topic(topic, &title, &body, None).await;
            let receipt = record_outcome("broadcast", started, outcome)?;

            Ok(match receipt {
                Some(receipt) => {
                    tracing::info!(
                        title = %title,
                        body = %body,
                        topic = %topic,
                        receipt = %receipt,
                        "Broadcast notification sent"
                    );
                    AdminResponse::ok("Broadcast notification sent successfully to all users")
                        .with_data(receipt)
                }
                None => AdminResponse::failure("Failed to send broadcast notification"),
            })
        }
        .await;

        fold(result, "Error")
    }

    /// List the active roles an admin can target.
    #[tracing::instrument(name = "admin.preload", skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn preload(&self, ctx: &RequestContext) -> AdminResponse {
        let result: Result<AdminResponse, AdminError> = async {
            let roles = self.directory.list_active_roles(ctx).await?;
            let options: Vec<RoleOption> = roles
                .iter()
                .filter(|role| role.is_active())
                .map(RoleOption::from)
                .collect();

            tracing::info!(count = options.len(), "Loaded active roles");
            for option in &options {
                tracing::debug!(key = %option.key, value = %option.value, "Role");
            }

            Ok(AdminResponse::ok("Roles loaded successfully")
                .with_message(format!("Loaded {} active role(s)", options.len()))
                .with_result("roleList", options))
        }
        .await;

        fold(result, "Error loading roles")
    }

    /// Send to the topic of each selected role.
    ///
    /// Entries that are not integers and sends the gateway does not accept are
    /// logged and skipped; the batch always runs to the end and reports success
    /// with the number of roles actually reached.
    #[tracing::instrument(name = "admin.send_to_roles", skip(self, request, ctx), fields(request_id = %ctx.request_id))]
    pub async fn send_to_roles(
        &self,
        request: SendToRolesRequest,
        ctx: &RequestContext,
    ) -> AdminResponse {
        let result: Result<AdminResponse, AdminError> = async {
            let (title, body) = require_title_and_body(request.title, request.body)?;
            let selected = match request.selected_roles {
                Some(selected) if !selected.is_empty() => selected,
                _ => {
                    return Err(AdminError::Validation(
                        "At least one role must be selected".to_string(),
                    ))
                }
            };

            tracing::info!(
                title = %title,
                body = %body,
                targets = ?selected,
                "Sending role-based notification"
            );

            let summary = self.dispatch_to_roles(&selected, &title, &body, ctx).await?;

            tracing::info!(
                requested = summary.requested,
                sent = summary.total_sent(),
                failed = summary.failed.len(),
                rejected = summary.rejected.len(),
                roles = ?summary.sent_to,
                "Role-based notification summary"
            );

            Ok(AdminResponse::ok(format!(
                "Role-based notification sent to {} role(s)",
                summary.total_sent()
            ))
            .with_result("sentToRoles", &summary.sent_to)
            .with_result("totalSent", summary.total_sent()))
        }
        .await;

        fold(result, "Error")
    }

    /// Static description of the available operations.
    pub fn info() -> AdminResponse {
        AdminResponse::ok(INFO_MESSAGE).with_result("endpoints", INFO_ENDPOINTS)
    }

    async fn dispatch_to_roles(
        &self,
        selected: &[Value],
        title: &str,
        body: &str,
        ctx: &RequestContext,
    ) -> Result<RoleDispatchSummary, AdminError> {
        let mut summary = RoleDispatchSummary {
            requested: selected.len(),
            ..Default::default()
        };

        for entry in selected {
            let Some(role_id) = parse_role_id(entry) else {
                tracing::warn!(role_id = %entry, "Invalid role id, skipping");
                DispatchMetrics::record_rejected_role_id();
                summary.rejected.push(entry.to_string());
                continue;
            };

            // Directory faults abort the whole batch
            let role_name = self
                .directory
                .find_role_by_id(role_id, ctx)
                .await?
                .map(|role| role.name)
                .unwrap_or_else(|| format!("Role{}", role_id));

            let topic = self.topics.role_topic(role_id);
            let started = Instant::now();
            let outcome = self.gateway.send_to_topic(&topic, title, body, None).await;

            match record_outcome("role", started, outcome) {
                Ok(Some(receipt)) => {
                    tracing::info!(role = %role_name, topic = %topic, receipt = %receipt, "Sent to role");
                    summary.sent_to.push(role_name);
                }
                Ok(None) => {
                    tracing::warn!(role = %role_name, topic = %topic, "Gateway did not accept role notification");
                    summary.failed.push(role_name);
                }
                Err(e) => {
                    tracing::warn!(role = %role_name, topic = %topic, error = %e, "Failed to send to role");
                    summary.failed.push(role_name);
                }
            }
        }

        Ok(summary)
    }
}

fn require_title_and_body(
    title: Option<String>,
    body: Option<String>,
) -> Result<(String, String), AdminError> {
    match (title, body) {
        (Some(title), Some(body)) => Ok((title, body)),
        _ => Err(AdminError::Validation(
            "Title and body are required".to_string(),
        )),
    }
}

/// Record latency and outcome metrics for one gateway call.
fn record_outcome(
    target: &str,
    started: Instant,
    outcome: Result<Option<Receipt>, DispatchError>,
) -> Result<Option<Receipt>, DispatchError> {
    DispatchMetrics::observe_latency(target, started.elapsed());
    match &outcome {
        Ok(Some(_)) => DispatchMetrics::record_sent(target),
        Ok(None) | Err(_) => DispatchMetrics::record_failed(target),
    }
    outcome
}

/// Turn an operation result into an envelope. Validation failures carry their
/// own message; other faults are prefixed with `fault_prefix`.
fn fold(result: Result<AdminResponse, AdminError>, fault_prefix: &str) -> AdminResponse {
    match result {
        Ok(response) => response,
        Err(AdminError::Validation(message)) => {
            tracing::debug!(message = %message, "Rejected admin request");
            AdminResponse::failure(message)
        }
        Err(e) => {
            tracing::error!(error = %e, "Admin notification operation failed");
            AdminResponse::failure(format!("{}: {}", fault_prefix, e))
        }
    }
}
