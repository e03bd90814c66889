use anyhow::{Context, Result};
use log::{error, info};
use std::sync::Arc;

use crate::app_config::{CacheBackend, Config};
use crate::cache::{MemoryCache, RedisCache, ResultCache};
use crate::database::connection::IN_MEMORY_PATH;
use crate::database::Repository;
use crate::errors::{AppError, StoreError};
use crate::language_utils::WhatlangDetector;
use crate::server::TranslationServer;
use crate::translation::TranslationHandler;

// @module: Application controller wiring configuration to the server

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with an in-memory setup
    pub fn new_for_test() -> Result<Self> {
        let mut config = Config::default();
        config.cache.backend = CacheBackend::Memory;
        config.database.path = ":memory:".to_string();
        Self::with_config(config)
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open the translation store
    ///
    /// Failure here is fatal: the schema must exist before serving.
    pub fn open_store(&self) -> Result<Repository, AppError> {
        let path = self.config.database.path.as_str();
        let repo = if path == IN_MEMORY_PATH {
            Repository::new_in_memory()
        } else {
            Repository::open(path)
        }
        .map_err(StoreError::from)?;

        match repo.connection().stats() {
            Ok(stats) => info!("Translation memory ready: {}", stats),
            Err(e) => error!("Could not read database statistics: {}", e),
        }

        Ok(repo)
    }

    /// Create the configured result cache and check connectivity
    ///
    /// An unreachable cache is logged and otherwise ignored; requests will
    /// fail until it comes back.
    pub async fn open_cache(&self) -> Result<Arc<dyn ResultCache>, AppError> {
        let cache: Arc<dyn ResultCache> = match self.config.cache.backend {
            CacheBackend::Redis => Arc::new(RedisCache::new(&self.config.cache.redis_url)?),
            CacheBackend::Memory => Arc::new(MemoryCache::new()),
        };

        match cache.ping().await {
            Ok(()) => info!("Connected to {} cache", cache.backend_name()),
            Err(e) => error!("Could not connect to {} cache: {}", cache.backend_name(), e),
        }

        Ok(cache)
    }

    /// Build the request handler from the configuration
    pub async fn build_handler(&self) -> Result<TranslationHandler> {
        let store = self.open_store()?;
        let cache = self.open_cache().await?;
        let detector = WhatlangDetector::new(
            self.config.detection.min_letters,
            self.config.detection.min_confidence,
        );

        Ok(TranslationHandler::new(cache, Arc::new(store), Arc::new(detector)))
    }

    /// Build the server without starting it
    pub async fn build_server(&self) -> Result<TranslationServer> {
        let handler = self.build_handler().await?;
        Ok(TranslationServer::new(self.config.server.clone(), handler))
    }

    /// Run the server until shutdown
    pub async fn run(&self) -> Result<()> {
        let server = self.build_server().await?;
        server.start().await?;
        Ok(())
    }
}
