//! SQLite-backed key-value store.

use crate::config::StoreConfig;
use crate::error::{Result, WebToAppError};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One stored row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueRow {
    pub id: i64,
    pub key: String,
    pub value: Option<String>,
    /// SQLite `CURRENT_TIMESTAMP` text (`YYYY-MM-DD HH:MM:SS`, UTC).
    pub created_at: String,
}

/// Append-only key-value store rooted at one app's storage directory.
///
/// Holds only the database path: every operation opens its own connection,
/// runs one statement and closes it again.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    db_path: PathBuf,
}

impl KeyValueStore {
    /// Open (and lazily create) the store inside `storage_dir`.
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self> {
        let storage_dir = storage_dir.as_ref();
        std::fs::create_dir_all(storage_dir)
            .map_err(|e| WebToAppError::io_with_path(e, storage_dir))?;

        let store = Self {
            db_path: storage_dir.join(StoreConfig::DB_FILENAME),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path).map_err(|e| WebToAppError::Database {
            message: format!("Failed to open {}: {}", self.db_path.display(), e),
            source: Some(e),
        })?;
        conn.busy_timeout(std::time::Duration::from_millis(
            StoreConfig::BUSY_TIMEOUT_MS as u64,
        ))?;
        Ok(conn)
    }

    /// Create the table if missing. Safe to run on every startup.
    fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS user_data (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                key TEXT NOT NULL,
                value TEXT,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .map_err(|e| WebToAppError::Database {
            message: format!("Failed to initialize store schema: {}", e),
            source: Some(e),
        })?;
        Ok(())
    }

    /// Append a row. Earlier rows for the same key are kept.
    ///
    /// Returns the id of the new row.
    pub fn save(&self, key: &str, value: Option<&str>) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO user_data (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        let id = conn.last_insert_rowid();
        debug!("Saved key {} as row {}", key, id);
        Ok(id)
    }

    /// Value of the newest row for `key`.
    ///
    /// `None` when no row matches; a stored null also reads as `None`.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.connect()?;
        let value: Option<Option<String>> = conn
            .query_row(
                "SELECT value FROM user_data WHERE key = ?1 ORDER BY id DESC LIMIT 1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.flatten())
    }

    /// Remove every row for `key`. Returns the number of rows removed.
    pub fn delete(&self, key: &str) -> Result<usize> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM user_data WHERE key = ?1", params![key])?;
        debug!("Deleted {} rows for key {}", removed, key);
        Ok(removed)
    }

    /// All rows, newest first.
    pub fn list_all(&self) -> Result<Vec<KeyValueRow>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, key, value, created_at FROM user_data
             ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(KeyValueRow {
                id: row.get(0)?,
                key: row.get(1)?,
                value: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}
