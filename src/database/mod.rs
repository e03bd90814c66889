/*!
 * Database module for persistent storage of translations.
 *
 * This module provides SQLite-based persistence for the translation memory
 * and the `TranslationStore` trait the request handler depends on.
 */

use async_trait::async_trait;

use crate::errors::StoreError;

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use models::{NewTranslationRecord, TranslationRecord};
pub use repository::Repository;

/// Durable record store consulted on cache misses
///
/// Lookups key on normalized text. No uniqueness is enforced: concurrent
/// misses for the same text may insert duplicate records, and lookups
/// return the oldest one.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// Find the stored translation for a normalized text
    async fn find_translation(&self, original_text: &str) -> Result<Option<String>, StoreError>;

    /// Persist a new record, returning its id
    async fn insert_translation(&self, record: &NewTranslationRecord) -> Result<i64, StoreError>;
}
