use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::directory::RoleStatus;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub otel: OtelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed origins for the admin UI. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Push gateway selection and topic naming.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// `fcm`, `redis` or `log`
    #[serde(default = "default_gateway_backend")]
    pub backend: String,
    /// Topic every client subscribes to
    #[serde(default = "default_broadcast_topic")]
    pub broadcast_topic: String,
    /// Prefix of per-role topics, followed by the numeric role id
    #[serde(default = "default_role_topic_prefix")]
    pub role_topic_prefix: String,
    #[serde(default)]
    pub fcm: FcmConfig,
    #[serde(default)]
    pub redis: RedisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FcmConfig {
    #[serde(default = "default_fcm_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub project_id: String,
    /// OAuth2 bearer token for the HTTP v1 API
    pub access_token: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_fcm_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Prefix for pub/sub channels (`{prefix}:topic:{name}`)
    #[serde(default = "default_channel_prefix")]
    pub channel_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// `postgres` or `memory`
    #[serde(default = "default_directory_backend")]
    pub backend: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Roles served by the memory backend
    #[serde(default)]
    pub roles: Vec<SeedRole>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRole {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub status: RoleStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtelConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_otel_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,
    /// Emit log lines as JSON instead of the human readable format
    #[serde(default)]
    pub json_logs: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8084
}

fn default_gateway_backend() -> String {
    "log".to_string()
}

fn default_broadcast_topic() -> String {
    "all_users".to_string()
}

fn default_role_topic_prefix() -> String {
    "role_".to_string()
}

fn default_fcm_base_url() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_fcm_timeout() -> u64 {
    10
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_channel_prefix() -> String {
    "push".to_string()
}

fn default_directory_backend() -> String {
    "memory".to_string()
}

fn default_database_url() -> String {
    "postgres://localhost/ors".to_string()
}

fn default_pool_size() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_idle_timeout() -> u64 {
    300 // 5 minutes
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "admin-notification-gateway".to_string()
}

fn default_sampling_ratio() -> f64 {
    1.0
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        Self::load(Environment::default())
    }

    /// Build settings from defaults, config files and the given environment source.
    fn load(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("gateway.backend", default_gateway_backend())?
            .set_default("directory.backend", default_directory_backend())?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables use a double underscore between sections
            // so that keys keep their own underscores:
            // SERVER__PORT, GATEWAY__BACKEND, GATEWAY__FCM__ACCESS_TOKEN, ...
            .add_source(
                environment
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend: default_gateway_backend(),
            broadcast_topic: default_broadcast_topic(),
            role_topic_prefix: default_role_topic_prefix(),
            fcm: FcmConfig::default(),
            redis: RedisConfig::default(),
        }
    }
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            base_url: default_fcm_base_url(),
            project_id: String::new(),
            access_token: None,
            timeout_seconds: default_fcm_timeout(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            channel_prefix: default_channel_prefix(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            backend: default_directory_backend(),
            database: DatabaseConfig::default(),
            roles: vec![],
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            pool_size: default_pool_size(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl Default for OtelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_otel_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8084);

        let gateway = GatewayConfig::default();
        assert_eq!(gateway.backend, "log");
        assert_eq!(gateway.broadcast_topic, "all_users");
        assert_eq!(gateway.role_topic_prefix, "role_");
    }

    #[test]
    fn test_seed_roles_from_toml() {
        let source = r#"
            [directory]
            backend = "memory"

            [[directory.roles]]
            id = 1
            name = "Admin"

            [[directory.roles]]
            id = 4
            name = "Kiosk"
            status = "Inactive"
        "#;

        let settings: Settings = Config::builder()
            .add_source(File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.directory.roles.len(), 2);
        assert_eq!(settings.directory.roles[0].status, RoleStatus::Active);
        assert_eq!(settings.directory.roles[1].status, RoleStatus::Inactive);
        assert_eq!(settings.gateway.broadcast_topic, "all_users");
    }

    fn env_source(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().source(Some(map))
    }

    #[test]
    fn test_env_overrides_use_double_underscore() {
        let settings = Settings::load(env_source(&[
            ("SERVER__PORT", "9999"),
            ("GATEWAY__BACKEND", "fcm"),
            ("GATEWAY__FCM__PROJECT_ID", "ors-prod"),
            ("SERVER__CORS_ORIGINS", "https://a.example,https://b.example"),
        ]))
        .unwrap();

        assert_eq!(settings.server.port, 9999);
        assert_eq!(settings.gateway.backend, "fcm");
        assert_eq!(settings.gateway.fcm.project_id, "ors-prod");
        assert_eq!(
            settings.server.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_single_underscore_names_are_not_sections() {
        let settings = Settings::load(env_source(&[
            ("SERVER_PORT", "9999"),
            ("GATEWAY_BACKEND", "fcm"),
        ]))
        .unwrap();

        assert_eq!(settings.server.port, default_port());
        assert_eq!(settings.gateway.backend, default_gateway_backend());
    }

}
