/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for all database operations,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

use super::connection::DatabaseConnection;
use super::models::{NewTranslationRecord, TranslationRecord};
use super::TranslationStore;
use crate::errors::StoreError;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open (or create) the database file at the given path
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db = DatabaseConnection::new(db_path)?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Access the underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // Translation memory operations
    // =========================================================================

    /// Get the translated text stored for a normalized text
    pub async fn get_translation(&self, original_text: &str) -> Result<Option<String>> {
        let original_text = original_text.to_string();

        self.db
            .execute_async(move |conn| Self::get_translation_sync(conn, &original_text))
            .await
    }

    /// Get the translated text (synchronous version)
    fn get_translation_sync(conn: &Connection, original_text: &str) -> Result<Option<String>> {
        let result = conn
            .query_row(
                "SELECT translated_text FROM translation_memory WHERE original_text = ?1 ORDER BY id LIMIT 1",
                [original_text],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to query translation_memory")?;

        Ok(result)
    }

    /// Insert a translation record, returning the new id
    pub async fn insert_record(&self, record: &NewTranslationRecord) -> Result<i64> {
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO translation_memory (original_text, detected_language, translated_text)
                    VALUES (?1, ?2, ?3)
                    "#,
                    params![
                        record.original_text,
                        record.detected_language,
                        record.translated_text,
                    ],
                )
                .context("Failed to insert translation record")?;

                let id = conn.last_insert_rowid();
                debug!("Stored translation record {} ({})", id, record.detected_language);
                Ok(id)
            })
            .await
    }

    /// Get all records stored for a normalized text, oldest first
    pub async fn find_records(&self, original_text: &str) -> Result<Vec<TranslationRecord>> {
        let original_text = original_text.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, original_text, detected_language, translated_text
                    FROM translation_memory WHERE original_text = ?1 ORDER BY id
                    "#,
                )?;

                let records = stmt
                    .query_map([original_text], Self::record_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(records)
            })
            .await
    }

    /// Get the most recently inserted records, newest first
    pub async fn recent_records(&self, limit: usize) -> Result<Vec<TranslationRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, original_text, detected_language, translated_text
                    FROM translation_memory ORDER BY id DESC LIMIT ?1
                    "#,
                )?;

                let records = stmt
                    .query_map([limit], Self::record_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(records)
            })
            .await
    }

    /// Count all stored records
    pub async fn count_records(&self) -> Result<i64> {
        self.db
            .execute_async(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM translation_memory", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
    }

    fn record_from_row(row: &Row<'_>) -> rusqlite::Result<TranslationRecord> {
        Ok(TranslationRecord {
            id: row.get(0)?,
            original_text: row.get(1)?,
            detected_language: row.get(2)?,
            translated_text: row.get(3)?,
        })
    }
}

#[async_trait]
impl TranslationStore for Repository {
    async fn find_translation(&self, original_text: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get_translation(original_text).await?)
    }

    async fn insert_translation(&self, record: &NewTranslationRecord) -> Result<i64, StoreError> {
        Ok(self.insert_record(record).await?)
    }
}
