//! Persisted snapshot of the whole date → tasks mapping.
//!
//! # Responsibility
//! - Encode the mapping as one JSON object keyed by `YYYY-MM-DD`.
//! - Decode it back, normalizing away empty days.
//!
//! # Invariants
//! - Encoding is deterministic: keys are written in ascending date order.
//! - A decoded snapshot never contains a key mapping to an empty list.
//!
//! Layout:
//! `{"2026-02-21":[{"id":"<uuid>","title":"Buy milk","isCompleted":false}]}`

use crate::model::date_key::DateKey;
use crate::model::task::Task;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// In-memory form of the persisted mapping.
pub type TaskSnapshot = BTreeMap<DateKey, Vec<Task>>;

/// Snapshot codec failure.
#[derive(Debug)]
pub enum SnapshotError {
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode task snapshot: {err}"),
            Self::Decode(err) => write!(f, "failed to decode task snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

/// Serializes the full mapping.
pub fn encode_snapshot(snapshot: &TaskSnapshot) -> Result<Vec<u8>, SnapshotError> {
    serde_json::to_vec(snapshot).map_err(SnapshotError::Encode)
}

/// Deserializes a full mapping, dropping days with no tasks.
pub fn decode_snapshot(blob: &[u8]) -> Result<TaskSnapshot, SnapshotError> {
    let mut snapshot: TaskSnapshot =
        serde_json::from_slice(blob).map_err(SnapshotError::Decode)?;
    snapshot.retain(|_, tasks| !tasks.is_empty());
    Ok(snapshot)
}
