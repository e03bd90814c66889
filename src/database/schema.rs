/*!
 * Translation memory schema.
 *
 * `translation_memory` is created idempotently, so a database written by an
 * earlier deployment that predates `schema_version` is adopted with its rows.
 */

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Name of the table holding translation records
pub const TRANSLATION_TABLE: &str = "translation_memory";

/// Bring the schema up to `SCHEMA_VERSION`
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    match read_schema_version(conn)? {
        0 => {
            info!("Creating translation memory schema v{}", SCHEMA_VERSION);
            create_tables(conn)?;
            write_schema_version(conn, SCHEMA_VERSION)
        }
        SCHEMA_VERSION => {
            debug!("Translation memory schema is current (v{})", SCHEMA_VERSION);
            Ok(())
        }
        newer if newer > SCHEMA_VERSION => Err(anyhow!(
            "Database schema v{} was written by a newer release (supported: v{})",
            newer,
            SCHEMA_VERSION
        )),
        unknown => Err(anyhow!("Unknown schema version: {}. Cannot migrate.", unknown)),
    }
}

/// Stored schema version, 0 when the database has never been initialized
fn read_schema_version(conn: &Connection) -> Result<i32> {
    let has_version_table: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to inspect sqlite_master")?;

    if !has_version_table {
        return Ok(0);
    }

    // A version table without its row counts as uninitialized; any other
    // failure must not be mistaken for a fresh database
    let version = conn
        .query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| row.get(0))
        .optional()
        .context("Failed to read schema version")?;

    Ok(version.unwrap_or(0))
}

fn write_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )
    .context("Failed to record schema version")?;
    Ok(())
}

fn create_tables(conn: &Connection) -> Result<()> {
    // Readers are not blocked while a request inserts
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            original_text TEXT,
            detected_language TEXT,
            translated_text TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_{table}_original ON {table}(original_text);
        "#,
        table = TRANSLATION_TABLE
    ))
    .context("Failed to create translation memory tables")?;

    Ok(())
}
