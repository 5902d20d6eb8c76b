//! Key-value slot in the `kv_slots` SQLite table.
//!
//! # Invariants
//! - One row per storage key; `save` upserts that row.
//! - The connection is migrated before the slot is usable.

use super::{SnapshotStore, StorageResult, StoreConfig};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};

/// Slot stored as one row of `kv_slots`.
pub struct SqliteSnapshotStore {
    conn: Connection,
    key: String,
}

impl SqliteSnapshotStore {
    /// Opens (and migrates) the database named by `config`.
    pub fn open(config: &StoreConfig) -> StorageResult<Self> {
        let conn = open_db(&config.db_path)?;
        Ok(Self::new(conn, config.storage_key.clone()))
    }

    /// Slot backed by a fresh in-memory database.
    pub fn in_memory(key: impl Into<String>) -> StorageResult<Self> {
        Ok(Self::new(open_db_in_memory()?, key))
    }

    /// Wraps an already migrated connection.
    pub fn new(conn: Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self) -> StorageResult<Option<Vec<u8>>> {
        let blob = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                params![self.key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(blob)
    }

    fn save(&mut self, blob: &[u8]) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key, blob],
        )?;
        Ok(())
    }
}
