//! `CacheService` implementations backed by Redis, or by nothing at all.

use async_trait::async_trait;

use dc_core::errors::DomainResult;
use dc_core::services::CacheService;

use super::redis_client::RedisClient;

/// Pass-through cache storing strings in Redis
#[derive(Clone)]
pub struct RedisCache {
    client: RedisClient,
}

impl RedisCache {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.client.get(key).await?)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> DomainResult<()> {
        let ttl = if ttl_seconds == 0 {
            self.client.config().default_ttl
        } else {
            ttl_seconds
        };
        Ok(self.client.set_with_expiry(key, value, ttl).await?)
    }

    async fn delete(&self, key: &str) -> DomainResult<()> {
        self.client.delete(key).await?;
        Ok(())
    }
}

/// Cache used when Redis is disabled: every lookup misses
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCache;

#[async_trait]
impl CacheService for NoOpCache {
    async fn get(&self, _key: &str) -> DomainResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> DomainResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> DomainResult<()> {
        Ok(())
    }
}
