//! Admin notification endpoint
//!
//! Lets an administrator:
//! - Send a test notification to a single device
//! - Broadcast to every user
//! - List the roles that can be targeted
//! - Send to the topics of selected roles

mod envelope;
mod handlers;
mod models;
mod service;

pub use envelope::AdminResponse;
pub use handlers::{broadcast, info, preload, send_test, send_to_roles};
pub use models::{parse_role_id, BroadcastQuery, SendTestQuery, SendToRolesRequest};
pub use service::{AdminNotifier, RoleDispatchSummary, TopicNames};
