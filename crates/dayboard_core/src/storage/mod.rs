//! Write-through persistence slots for the task snapshot.
//!
//! # Responsibility
//! - Define the `load/save(blob)` contract the task store persists through.
//! - Provide SQLite, file and in-memory slot implementations.
//!
//! # Invariants
//! - A slot holds at most one blob; `save` replaces it entirely.
//! - `load` returning `Ok(None)` means the slot was never written.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file;
mod memory;
mod sqlite;

pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;
pub use sqlite::SqliteSnapshotStore;

/// Storage key used by the to-do list when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "SavedTasks";

pub type StorageResult<T> = Result<T, StorageError>;

/// Slot transport failure.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Io(std::io::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// One durable slot holding the serialized task mapping.
pub trait SnapshotStore {
    /// Reads the current blob, or `None` when the slot is empty.
    fn load(&self) -> StorageResult<Option<Vec<u8>>>;
    /// Overwrites the slot with `blob`.
    fn save(&mut self, blob: &[u8]) -> StorageResult<()>;
}

/// Location of the SQLite-backed task slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file; created and migrated on open.
    pub db_path: PathBuf,
    /// Row key inside `kv_slots`.
    pub storage_key: String,
}

impl StoreConfig {
    /// Config for `db_path` using [`DEFAULT_STORAGE_KEY`].
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }
}
