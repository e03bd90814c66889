/*!
 * Result cache implementations.
 *
 * This module contains the `ResultCache` trait and its backends:
 * - `RedisCache`: Redis-backed cache shared between server processes
 * - `MemoryCache`: process-local cache for tests and single-node runs
 *
 * Keys are normalized texts, values are translated texts. No expiry is set.
 */

use async_trait::async_trait;

use crate::errors::CacheError;

pub mod memory;
pub mod redis_cache;

pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

/// Key-value cache consulted before detection
///
/// The cache is advisory: a missing entry only costs a store lookup.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Get the cached translation for a normalized text
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a translation for a normalized text
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Check that the cache backend is reachable
    async fn ping(&self) -> Result<(), CacheError>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
