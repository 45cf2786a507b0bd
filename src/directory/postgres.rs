//! Role directory backed by the `st_role` table.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;

use crate::config::DatabaseConfig;

use super::{DirectoryError, RequestContext, Role, RoleDirectory, RoleStatus};

const LIST_ACTIVE_ROLES: &str =
    "SELECT id, name, status FROM st_role WHERE LOWER(status) = 'active' ORDER BY id";

const FIND_ROLE_BY_ID: &str = "SELECT id, name, status FROM st_role WHERE id = $1";

#[derive(Debug, FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    status: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role::new(row.id, row.name, RoleStatus::from_column(&row.status))
    }
}

pub struct PostgresRoleDirectory {
    pool: PgPool,
}

impl PostgresRoleDirectory {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DirectoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await?;

        tracing::info!(
            pool_size = config.pool_size,
            "PostgreSQL role directory pool created"
        );

        Ok(Self { pool })
    }
}

#[async_trait]
impl RoleDirectory for PostgresRoleDirectory {
    async fn list_active_roles(&self, ctx: &RequestContext) -> Result<Vec<Role>, DirectoryError> {
        let rows: Vec<RoleRow> = sqlx::query_as(LIST_ACTIVE_ROLES)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(request_id = %ctx.request_id, count = rows.len(), "Loaded active roles");
        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn find_role_by_id(
        &self,
        id: i64,
        ctx: &RequestContext,
    ) -> Result<Option<Role>, DirectoryError> {
        let row: Option<RoleRow> = sqlx::query_as(FIND_ROLE_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        tracing::debug!(request_id = %ctx.request_id, role_id = id, found = row.is_some(), "Role lookup");
        Ok(row.map(Role::from))
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let role = Role::from(RoleRow {
            id: 7,
            name: "College".to_string(),
            status: "Inactive".to_string(),
        });
        assert_eq!(role.id, 7);
        assert!(!role.is_active());
    }
}
