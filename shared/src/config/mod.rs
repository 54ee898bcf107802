//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing and Google OAuth client settings
//! - `cache` - Redis pass-through cache
//! - `database` - MySQL connection pool
//! - `environment` - Environment detection and logging
//! - `integrations` - Mail, image hosting, payment gateway and minting relay credentials
//! - `server` - HTTP server and CORS

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod integrations;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, GoogleOAuthConfig, JwtConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use integrations::{BlockchainConfig, CloudinaryConfig, MailConfig, MidtransConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,

    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub auth: AuthConfig,

    pub cache: CacheConfig,

    pub mail: MailConfig,

    pub cloudinary: CloudinaryConfig,

    pub midtrans: MidtransConfig,

    #[serde(default)]
    pub blockchain: BlockchainConfig,

    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            mail: MailConfig::default(),
            cloudinary: CloudinaryConfig::default(),
            midtrans: MidtransConfig::for_environment(env),
            blockchain: BlockchainConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            mail: MailConfig::from_env(),
            cloudinary: CloudinaryConfig::from_env(),
            midtrans: MidtransConfig::from_env(environment),
            blockchain: BlockchainConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

/// Read an environment variable, falling back to `default` when unset or unparsable
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
