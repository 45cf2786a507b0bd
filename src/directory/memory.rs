use async_trait::async_trait;
use dashmap::DashMap;

use crate::config::SeedRole;

use super::{DirectoryError, RequestContext, Role, RoleDirectory};

/// Role directory held in memory, seeded from configuration.
#[derive(Debug, Default)]
pub struct MemoryRoleDirectory {
    roles: DashMap<i64, Role>,
}

impl MemoryRoleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let directory = Self::new();
        for role in roles {
            directory.insert(role);
        }
        directory
    }

    pub fn from_seed(seed: &[SeedRole]) -> Self {
        Self::from_roles(
            seed.iter()
                .map(|s| Role::new(s.id, s.name.clone(), s.status)),
        )
    }

    /// Insert or replace a role
    pub fn insert(&self, role: Role) {
        self.roles.insert(role.id, role);
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[async_trait]
impl RoleDirectory for MemoryRoleDirectory {
    async fn list_active_roles(&self, ctx: &RequestContext) -> Result<Vec<Role>, DirectoryError> {
        let mut roles: Vec<Role> = self
            .roles
            .iter()
            .filter(|entry| entry.value().is_active())
            .map(|entry| entry.value().clone())
            .collect();
        roles.sort_by_key(|role| role.id);

        tracing::trace!(request_id = %ctx.request_id, count = roles.len(), "Listed active roles");
        Ok(roles)
    }

    async fn find_role_by_id(
        &self,
        id: i64,
        _ctx: &RequestContext,
    ) -> Result<Option<Role>, DirectoryError> {
        Ok(self.roles.get(&id).map(|entry| entry.value().clone()))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
