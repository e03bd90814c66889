/*!
 * # transmem - translation memory web service
 *
 * A small HTTP service that accepts text, detects its language, answers
 * with a translation from a static phrase table or the translation memory,
 * and caches results.
 *
 * ## Features
 *
 * - `POST /translate` with `{"text": "..."}`
 * - Unicode NFKC normalization of every lookup key
 * - Redis (or in-process) result cache consulted before detection
 * - SQLite translation memory (`translation_memory` table)
 * - `GET /health` reporting cache connectivity
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: Wiring configuration to collaborators and the server
 * - `normalizer`: NFKC key derivation
 * - `phrase_table`: Static fallback translations
 * - `language_utils`: Language detection and ISO code utilities
 * - `cache`: Result cache trait with Redis and memory backends
 * - `database`: Translation store trait and SQLite repository
 * - `translation`: The request handler
 * - `server`: axum routes and handlers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod app_controller;
pub mod cache;
pub mod database;
pub mod errors;
pub mod language_utils;
pub mod normalizer;
pub mod phrase_table;
pub mod server;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use cache::{MemoryCache, RedisCache, ResultCache};
pub use database::{Repository, TranslationStore};
pub use errors::{AppError, CacheError, DetectionError, StoreError, TranslateError};
pub use language_utils::{LanguageDetector, WhatlangDetector};
pub use normalizer::normalize;
pub use phrase_table::{PhraseTable, TRANSLATION_UNAVAILABLE};
pub use translation::{Provenance, TranslationHandler, TranslationOutcome};
