/*!
 * SQLite connection handle for the translation memory.
 *
 * One connection is shared behind a lock. Async callers go through
 * `execute_async`, which runs the closure on tokio's blocking pool.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::schema;

/// Path value that selects an in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// How long a statement waits on a locked database file before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared SQLite connection
#[derive(Clone)]
pub struct DatabaseConnection {
    db_path: PathBuf,
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Open (or create) the database file at `db_path`
    ///
    /// Missing parent directories are created and the schema is brought up
    /// to date before the handle is returned.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        info!("Opening translation memory at {:?}", db_path);

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .context("Failed to set database busy timeout")?;

        Self::from_connection(conn, db_path)
    }

    /// Open a throwaway in-memory database
    pub fn new_in_memory() -> Result<Self> {
        debug!("Opening in-memory translation memory");

        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        Self::from_connection(conn, PathBuf::from(IN_MEMORY_PATH))
    }

    fn from_connection(conn: Connection, db_path: PathBuf) -> Result<Self> {
        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Path the database was opened from, `:memory:` for in-memory databases
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Whether this handle points at an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.db_path.as_os_str() == IN_MEMORY_PATH
    }

    /// Run `f` against the connection on the current thread
    pub fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.connection.lock();
        f(&conn)
    }

    /// Run `f` against the connection on the blocking pool
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.connection);

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            f(&conn)
        })
        .await
        .context("Database task panicked")?
    }

    /// Record counts and on-disk size
    pub fn stats(&self) -> Result<DatabaseStats> {
        let (record_count, distinct_texts) = self.execute(|conn| {
            let counts = conn
                .query_row(
                    &format!(
                        "SELECT COUNT(*), COUNT(DISTINCT original_text) FROM {}",
                        schema::TRANSLATION_TABLE
                    ),
                    [],
                    |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
                )
                .context("Failed to count translation records")?;
            Ok(counts)
        })?;

        let file_size_bytes = if self.is_in_memory() {
            0
        } else {
            std::fs::metadata(&self.db_path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(DatabaseStats {
            record_count,
            distinct_texts,
            file_size_bytes,
        })
    }
}

/// Snapshot of the translation memory size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStats {
    /// Number of translation records
    pub record_count: i64,
    /// Number of distinct normalized texts; lower than the record count
    /// when concurrent misses inserted duplicates
    pub distinct_texts: i64,
    /// Database file size in bytes, 0 for in-memory databases
    pub file_size_bytes: u64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records, {} distinct texts, {} KB",
            self.record_count,
            self.distinct_texts,
            self.file_size_bytes / 1024
        )
    }
}
