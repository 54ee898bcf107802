//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::{env_or, env_string};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Whether the pass-through cache is used at all
    pub enabled: bool,

    /// Redis connection URL
    pub url: String,

    /// Default TTL for cache entries in seconds
    #[serde(default = "default_ttl")]
    pub default_ttl: u64,

    /// Prefix prepended to every key
    #[serde(default = "default_prefix")]
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::from("redis://localhost:6379"),
            default_ttl: default_ttl(),
            key_prefix: default_prefix(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            enabled: env_or("REDIS_ENABLED", false),
            url: env_string("REDIS_URL", "redis://localhost:6379"),
            default_ttl: env_or("REDIS_TTL_SECONDS", default_ttl()),
            key_prefix: env_string("REDIS_KEY_PREFIX", &default_prefix()),
        }
    }

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            enabled: true,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Build a namespaced key
    pub fn key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

fn default_ttl() -> u64 {
    300
}

fn default_prefix() -> String {
    String::from("darah-connect")
}
