use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleStatus {
    #[default]
    #[serde(alias = "active", alias = "ACTIVE")]
    Active,
    #[serde(alias = "inactive", alias = "INACTIVE")]
    Inactive,
}

impl RoleStatus {
    /// Parse a stored status column. Anything unrecognised is treated as inactive.
    pub fn from_column(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("active") {
            RoleStatus::Active
        } else {
            RoleStatus::Inactive
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub status: RoleStatus,
}

impl Role {
    pub fn new(id: i64, name: impl Into<String>, status: RoleStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RoleStatus::Active
    }
}

/// Dropdown entry shown in the admin UI: role id as `key`, name as `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleOption {
    pub key: String,
    pub value: String,
}

impl From<&Role> for RoleOption {
    fn from(role: &Role) -> Self {
        Self {
            key: role.id.to_string(),
            value: role.name.clone(),
        }
    }
}

/// Per-request context handed to the directory.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Role directory unavailable: {0}")]
    Unavailable(String),
}

/// Read-only lookup of roles.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// All roles with status `Active`, ordered by id.
    async fn list_active_roles(&self, ctx: &RequestContext) -> Result<Vec<Role>, DirectoryError>;

    /// `Ok(None)` when no role has this id.
    async fn find_role_by_id(
        &self,
        id: i64,
        ctx: &RequestContext,
    ) -> Result<Option<Role>, DirectoryError>;

    /// Backend name, for logs
    fn backend(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_column() {
        assert_eq!(RoleStatus::from_column("Active"), RoleStatus::Active);
        assert_eq!(RoleStatus::from_column(" ACTIVE "), RoleStatus::Active);
        assert_eq!(RoleStatus::from_column("Inactive"), RoleStatus::Inactive);
        assert_eq!(RoleStatus::from_column("archived"), RoleStatus::Inactive);
    }

    #[test]
    fn test_role_option_from_role() {
        let role = Role::new(3, "Student", RoleStatus::Active);
        let option = RoleOption::from(&role);
        assert_eq!(option.key, "3");
        assert_eq!(option.value, "Student");
        assert_eq!(
            serde_json::to_value(&option).unwrap(),
            serde_json::json!({"key": "3", "value": "Student"})
        );
    }
}
