//! SQLite-backed record store

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use super::store::KeyValueStore;
use crate::error::Result;

/// The Library keeps gallery records in a SQLite database.
/// Each record is a single JSON string addressed by key.
pub struct SqliteStore {
    conn: Connection,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open (or create) the record database at `db_path`.
    ///
    /// Parent directories are created as needed.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&db_path)?;
        info!(path = %db_path.display(), "gallery database opened");

        let store = SqliteStore { conn, db_path };
        store.init_schema()?;

        Ok(store)
    }

    /// Open a private in-memory database (nothing survives the process)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = SqliteStore {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create the records table if it doesn't exist
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS records (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL,
                updated_at      INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Get a count of stored records
    pub fn record_count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("imageGalleryUser", "{}").unwrap();
        store.set("imageGalleryUser", "{\"nickname\":\"alice\"}").unwrap();

        assert_eq!(
            store.get("imageGalleryUser").unwrap().as_deref(),
            Some("{\"nickname\":\"alice\"}")
        );
        assert_eq!(store.record_count().unwrap(), 1);
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("gallery.db");

        {
            let mut store = SqliteStore::open(&db_path).unwrap();
            store.set("k", "v").unwrap();
        }

        let store = SqliteStore::open(&db_path).unwrap();
        assert_eq!(store.path(), db_path.as_path());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
