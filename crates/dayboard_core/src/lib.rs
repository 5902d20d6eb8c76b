//! Core domain logic for Dayboard.
//! This crate is the single source of truth for to-do list invariants.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::date_key::{DateKey, DateKeyParseError};
pub use model::snapshot::{SnapshotError, TaskSnapshot};
pub use model::task::{Task, TaskId};
pub use service::task_store::TaskStore;
pub use storage::{
    FileSnapshotStore, MemorySnapshotStore, SnapshotStore, SqliteSnapshotStore, StorageError,
    StorageResult, StoreConfig, DEFAULT_STORAGE_KEY,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
