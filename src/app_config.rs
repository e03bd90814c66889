use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and defaulting configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Result cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Translation store settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Language detection settings
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Address string suitable for binding a listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Result cache backend type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    // @backend: Redis server
    #[default]
    Redis,
    // @backend: Process-local map
    Memory,
}

impl CacheBackend {
    // @returns: Lowercase backend identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Redis => "redis".to_string(),
            Self::Memory => "memory".to_string(),
        }
    }
}

impl std::fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for CacheBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            _ => Err(anyhow!("Invalid cache backend: {}", s)),
        }
    }
}

/// Result cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    // @field: Backend type
    #[serde(default)]
    pub backend: CacheBackend,

    // @field: Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            redis_url: default_redis_url(),
        }
    }
}

/// Translation store configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Language detection configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DetectionConfig {
    /// Minimum number of alphabetic characters required for detection
    #[serde(default = "default_min_letters")]
    pub min_letters: usize,

    /// Minimum detector confidence (0.0 to 1.0)
    /// 0.0 accepts whatever language the detector picks
    #[serde(default)]
    pub min_confidence: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_letters: default_min_letters(),
            min_confidence: 0.0,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the `log` crate's level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/0".to_string()
}

fn default_database_path() -> String {
    "translations.db".to_string()
}

fn default_min_letters() -> usize {
    crate::language_utils::DEFAULT_MIN_LETTERS
}

impl Config {
    /// Load the configuration from a JSON file
    ///
    /// A missing file is not an error: defaults are used and a warning is logged.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            warn!("Config file not found at '{}', using defaults.", path.display());
            return Ok(Config::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(anyhow!("Server bind address must not be empty"));
        }

        if self.server.port == 0 {
            return Err(anyhow!("Server port must be greater than 0"));
        }

        if self.database.path.trim().is_empty() {
            return Err(anyhow!("Database path must not be empty"));
        }

        if self.cache.backend == CacheBackend::Redis {
            let url = self.cache.redis_url.as_str();
            if !(url.starts_with("redis://") || url.starts_with("rediss://")) {
                return Err(anyhow!(
                    "Redis URL must start with redis:// or rediss://, got '{}'",
                    url
                ));
            }
        }

        if self.detection.min_letters == 0 {
            return Err(anyhow!("Detection min_letters must be at least 1"));
        }

        if !(0.0..=1.0).contains(&self.detection.min_confidence) {
            return Err(anyhow!(
                "Detection min_confidence must be between 0.0 and 1.0, got {}",
                self.detection.min_confidence
            ));
        }

        Ok(())
    }
}
