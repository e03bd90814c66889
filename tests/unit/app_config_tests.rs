/*!
 * Tests for application configuration functionality
 */

use std::fs;
use tempfile::TempDir;

use transmem::app_config::{CacheBackend, Config, LogLevel};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.server.bind_addr, "127.0.0.1");
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.cache.backend, CacheBackend::Redis);
    assert_eq!(config.cache.redis_url, "redis://127.0.0.1:6379/0");
    assert_eq!(config.database.path, "translations.db");
    assert_eq!(config.detection.min_letters, 2);
    assert_eq!(config.detection.min_confidence, 0.0);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_withMissingFile_shouldReturnDefaultsWithoutCreatingFile() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load(&path).unwrap();

    assert_eq!(config.server.port, 5000);
    assert!(!path.exists());
}

#[test]
fn test_load_withPartialFile_shouldFillMissingSectionsWithDefaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    fs::write(
        &path,
        r#"{ "server": { "port": 8080 }, "cache": { "backend": "memory" }, "log_level": "debug" }"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.bind_addr, "127.0.0.1");
    assert_eq!(config.cache.backend, CacheBackend::Memory);
    assert_eq!(config.cache.redis_url, "redis://127.0.0.1:6379/0");
    assert_eq!(config.database.path, "translations.db");
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_load_withInvalidJson_shouldFail() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    fs::write(&path, "{ not json").unwrap();

    let result = Config::load(&path);

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("Failed to parse config file"));
}

#[test]
fn test_config_serialization_shouldRoundTripThroughFile() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.database.path = "/var/lib/transmem/memory.db".to_string();
    config.detection.min_confidence = 0.25;
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.database.path, "/var/lib/transmem/memory.db");
    assert_eq!(loaded.detection.min_confidence, 0.25);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.server.port = 0;
    assert!(config.validate().is_err());
    config.server.port = 5000;

    config.server.bind_addr = "  ".to_string();
    assert!(config.validate().is_err());
    config.server.bind_addr = "0.0.0.0".to_string();

    config.database.path = String::new();
    assert!(config.validate().is_err());
    config.database.path = ":memory:".to_string();
    assert!(config.validate().is_ok());

    config.cache.redis_url = "http://localhost:6379".to_string();
    assert!(config.validate().is_err());
    config.cache.redis_url = "rediss://cache.internal:6380/1".to_string();
    assert!(config.validate().is_ok());

    config.detection.min_letters = 0;
    assert!(config.validate().is_err());
    config.detection.min_letters = 1;

    config.detection.min_confidence = 1.5;
    assert!(config.validate().is_err());
    config.detection.min_confidence = 0.5;
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withMemoryBackend_shouldIgnoreRedisUrl() {
    let mut config = Config::default();
    config.cache.backend = CacheBackend::Memory;
    config.cache.redis_url = "not a url".to_string();

    assert!(config.validate().is_ok());
}

#[test]
fn test_cacheBackend_fromStr_shouldAcceptKnownNames() {
    assert_eq!("redis".parse::<CacheBackend>().unwrap(), CacheBackend::Redis);
    assert_eq!("MEMORY".parse::<CacheBackend>().unwrap(), CacheBackend::Memory);
    assert!("memcached".parse::<CacheBackend>().is_err());
    assert_eq!(CacheBackend::Memory.to_string(), "memory");
}
