mod settings;

pub use settings::{
    DatabaseConfig, DirectoryConfig, FcmConfig, GatewayConfig, OtelConfig, RedisConfig,
    SeedRole, ServerConfig, Settings,
};
