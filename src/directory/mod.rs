//! Role lookup used to populate the admin UI and to name role topics.
//!
//! - `MemoryRoleDirectory`: roles seeded from configuration (default)
//! - `PostgresRoleDirectory`: reads the `st_role` table through sqlx

mod memory;
mod postgres;
mod types;

use std::sync::Arc;

use crate::config::DirectoryConfig;

pub use memory::MemoryRoleDirectory;
pub use postgres::PostgresRoleDirectory;
pub use types::{DirectoryError, RequestContext, Role, RoleDirectory, RoleOption, RoleStatus};

/// Create the role directory selected by `directory.backend`.
pub async fn create_directory(
    config: &DirectoryConfig,
) -> Result<Arc<dyn RoleDirectory>, DirectoryError> {
    match config.backend.as_str() {
        "postgres" => {
            tracing::info!(backend = "postgres", "Creating PostgreSQL role directory");
            Ok(Arc::new(PostgresRoleDirectory::connect(&config.database).await?))
        }
        "memory" => {
            tracing::info!(backend = "memory", "Creating memory role directory");
            Ok(Arc::new(seeded_directory(config)))
        }
        other => {
            tracing::warn!(
                backend = %other,
                "Unknown directory backend, falling back to memory"
            );
            Ok(Arc::new(seeded_directory(config)))
        }
    }
}

fn seeded_directory(config: &DirectoryConfig) -> MemoryRoleDirectory {
    let directory = MemoryRoleDirectory::from_seed(&config.roles);
    if directory.is_empty() {
        tracing::warn!("Memory role directory has no seed roles");
    } else {
        tracing::info!(roles = directory.len(), "Memory role directory seeded");
    }
    directory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedRole;

    #[tokio::test]
    async fn test_unknown_backend_falls_back_to_seeded_memory() {
        let config = DirectoryConfig {
            backend: "ldap".to_string(),
            roles: vec![
                SeedRole {
                    id: 2,
                    name: "Faculty".to_string(),
                    status: RoleStatus::Active,
                },
                SeedRole {
                    id: 9,
                    name: "Kiosk".to_string(),
                    status: RoleStatus::Inactive,
                },
            ],
            ..DirectoryConfig::default()
        };

        let directory = create_directory(&config).await.unwrap();
        assert_eq!(directory.backend(), "memory");

        let roles = directory.list_active_roles(&RequestContext::new()).await.unwrap();
        assert_eq!(roles, vec![Role::new(2, "Faculty", RoleStatus::Active)]);
    }

    #[test]
    fn test_seeded_directory_without_roles_is_empty() {
        let directory = seeded_directory(&DirectoryConfig::default());
        assert!(directory.is_empty());
        assert_eq!(directory.len(), 0);
    }
}
