/*!
 * Tests for result cache backends
 */

use transmem::cache::{MemoryCache, RedisCache, ResultCache};
use transmem::errors::CacheError;

#[tokio::test]
async fn test_memoryCache_get_withMissingKey_shouldReturnNone() {
    let cache = MemoryCache::new();

    assert_eq!(cache.get("Guten Morgen").await.unwrap(), None);
}

#[tokio::test]
async fn test_memoryCache_set_shouldBeVisibleThroughClones() {
    let cache = MemoryCache::new();
    let shared: Box<dyn ResultCache> = Box::new(cache.clone());

    shared.set("Guten Morgen", "Good morning").await.unwrap();

    assert_eq!(cache.lookup("Guten Morgen").as_deref(), Some("Good morning"));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_memoryCache_set_withSameKey_shouldOverwrite() {
    let cache = MemoryCache::new();

    cache.set("你好", "Hello").await.unwrap();
    cache.set("你好", "Hi").await.unwrap();

    assert_eq!(cache.get("你好").await.unwrap().as_deref(), Some("Hi"));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_memoryCache_stats_shouldCountHitsAndMisses() {
    let cache = MemoryCache::new();
    cache.store("안녕하세요", "Hello");

    let _ = cache.get("안녕하세요").await;
    let _ = cache.get("missing").await;

    let (hits, misses, rate) = cache.stats();
    assert_eq!(hits, 1);
    assert_eq!(misses, 1);
    assert!((rate - 0.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_memoryCache_ping_shouldAlwaysSucceed() {
    let cache = MemoryCache::new();

    assert!(cache.ping().await.is_ok());
    assert_eq!(cache.backend_name(), "memory");
}

#[test]
fn test_redisCache_new_withMalformedUrl_shouldFail() {
    let result = RedisCache::new("not-a-redis-url");

    assert!(matches!(result, Err(CacheError::Connection(_))));
}

#[tokio::test]
async fn test_redisCache_withUnreachableServer_shouldReportConnectionError() {
    let cache = RedisCache::new("redis://127.0.0.1:1/0").unwrap();

    assert_eq!(cache.backend_name(), "redis");
    assert!(cache.ping().await.is_err());
    assert!(cache.get("Guten Morgen").await.is_err());
}
