//! Cache module for Redis-based caching
//!
//! Provides the Redis client and the `CacheService` implementations used for
//! the landing page.

pub mod cache_service;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use cache_service::{NoOpCache, RedisCache};
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use dc_shared::CacheConfig;
