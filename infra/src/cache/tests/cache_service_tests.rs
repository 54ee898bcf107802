//! Tests for the CacheService implementations

use dc_core::services::CacheService;
use dc_shared::CacheConfig;

use crate::cache::{NoOpCache, RedisCache, RedisClient};

#[tokio::test]
async fn test_noop_cache_always_misses() {
    let cache = NoOpCache;
    cache.set("landing-page", "{}", 60).await.unwrap();
    assert_eq!(cache.get("landing-page").await.unwrap(), None);
    cache.delete("landing-page").await.unwrap();
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_redis_cache_round_trip() {
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );
    let key = config.key("test:landing-page");
    let cache = RedisCache::new(RedisClient::new(config).await.unwrap());

    cache.set(&key, r#"{"active_campaigns":1}"#, 30).await.unwrap();
    assert_eq!(
        cache.get(&key).await.unwrap().as_deref(),
        Some(r#"{"active_campaigns":1}"#)
    );

    cache.delete(&key).await.unwrap();
    assert_eq!(cache.get(&key).await.unwrap(), None);
}
