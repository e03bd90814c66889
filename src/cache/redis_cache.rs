/*!
 * Redis-backed result cache.
 *
 * Entries are plain `SET key value` pairs: the key is the normalized text,
 * the value the translated text, both UTF-8, without prefix or TTL.
 */

use async_trait::async_trait;
use log::{debug, warn};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::ResultCache;
use crate::errors::CacheError;

/// Redis cache client
///
/// The connection is opened on first use and shared by all requests. A
/// connection-level failure drops it so the next call reconnects.
#[derive(Clone)]
pub struct RedisCache {
    client: Client,
    connection: Arc<Mutex<Option<MultiplexedConnection>>>,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("addr", &self.client.get_connection_info().addr)
            .finish()
    }
}

impl RedisCache {
    /// Create a new cache for the given `redis://` URL
    ///
    /// Only the URL is validated here; no connection is made.
    pub fn new(url: &str) -> Result<Self, CacheError> {
        let client = Client::open(url)
            .map_err(|e| CacheError::Connection(format!("Invalid Redis URL: {}", e)))?;

        Ok(Self {
            client,
            connection: Arc::new(Mutex::new(None)),
        })
    }

    /// Get the shared connection, opening it if needed
    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        let mut slot = self.connection.lock().await;

        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        debug!("Opening Redis connection to {}", self.client.get_connection_info().addr);
        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        *slot = Some(conn.clone());
        Ok(conn)
    }

    /// Convert a command error, dropping the connection if it is broken
    async fn command_failed(&self, error: RedisError) -> CacheError {
        if error.is_connection_dropped() || error.is_io_error() || error.is_connection_refusal() {
            warn!("Redis connection lost: {}", error);
            *self.connection.lock().await = None;
        }

        error.into()
    }
}

#[async_trait]
impl ResultCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;

        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.command_failed(e).await),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        match conn.set::<_, _, ()>(key, value).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.command_failed(e).await),
        }
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        let reply: Result<String, RedisError> = redis::cmd("PING").query_async(&mut conn).await;
        match reply {
            Ok(_) => Ok(()),
            Err(e) => Err(self.command_failed(e).await),
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
