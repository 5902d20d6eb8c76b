//! Task domain model.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused.
//! - `title` is non-empty for every task created through `TaskStore`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one task.
pub type TaskId = Uuid;

/// One completable unit of work scheduled on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identity used by toggle/delete and by list rendering.
    pub id: TaskId,
    /// Free-text display title.
    pub title: String,
    /// Serialized as `isCompleted` to match the persisted layout.
    #[serde(rename = "isCompleted")]
    pub completed: bool,
}

impl Task {
    /// Creates an uncompleted task with a fresh random ID.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates an uncompleted task with a caller-provided ID.
    pub fn with_id(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
