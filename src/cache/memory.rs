/*!
 * In-process result cache.
 *
 * Used in tests and when the server runs without Redis. Entries never
 * expire and the map grows without bound, like the Redis backend.
 */

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::ResultCache;
use crate::errors::CacheError;

/// Process-local cache for translations
#[derive(Clone, Default)]
pub struct MemoryCache {
    /// Internal cache storage
    cache: Arc<RwLock<HashMap<String, String>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,
}

impl MemoryCache {
    /// Create a new, empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a translation from the cache
    pub fn lookup(&self, key: &str) -> Option<String> {
        let cache = self.cache.read();

        match cache.get(key) {
            Some(translation) => {
                *self.hits.write() += 1;
                debug!("Cache hit for '{}'", truncate_text(key, 30));
                Some(translation.clone())
            }
            None => {
                *self.misses.write() += 1;
                debug!("Cache miss for '{}'", truncate_text(key, 30));
                None
            }
        }
    }

    /// Store a translation in the cache
    pub fn store(&self, key: &str, translation: &str) {
        self.cache.write().insert(key.to_string(), translation.to_string());
        debug!("Cached translation for '{}'", truncate_text(key, 30));
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.cache.write().clear();
        *self.hits.write() = 0;
        *self.misses.write() = 0;

        debug!("Memory cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.lookup(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.store(key, value);
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}
