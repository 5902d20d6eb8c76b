//! Date-keyed task store.
//!
//! # Responsibility
//! - Own the mapping from calendar day to the ordered tasks of that day.
//! - Write the whole mapping through to its slot after every mutation.
//!
//! # Invariants
//! - A present key always maps to a non-empty list.
//! - Tasks keep insertion order; delete removes only the matched task.
//! - Public operations never return errors or panic. Load failures start
//!   empty; save failures leave memory authoritative until the next save.

use crate::model::date_key::DateKey;
use crate::model::snapshot::{decode_snapshot, encode_snapshot, TaskSnapshot};
use crate::model::task::{Task, TaskId};
use crate::storage::SnapshotStore;
use chrono::NaiveDate;
use log::{debug, error, info, warn};

/// Single source of truth for all to-do tasks, grouped by day.
pub struct TaskStore<S: SnapshotStore> {
    storage: S,
    tasks_by_date: TaskSnapshot,
}

impl<S: SnapshotStore> TaskStore<S> {
    /// Builds a store over `storage`, loading whatever snapshot it holds.
    pub fn new(storage: S) -> Self {
        let tasks_by_date = load(&storage);
        Self {
            storage,
            tasks_by_date,
        }
    }

    /// Appends a new uncompleted task to the day of `date`.
    ///
    /// Returns `None` without touching storage when `title` is empty or
    /// `date` falls outside years `0000..=9999`.
    pub fn add_task(&mut self, date: NaiveDate, title: impl Into<String>) -> Option<Task> {
        let title = title.into();
        if title.is_empty() {
            debug!("event=task_add module=task_store status=skipped reason=empty_title");
            return None;
        }
        let Some(key) = DateKey::of(date) else {
            warn!("event=task_add module=task_store status=skipped reason=date_out_of_range");
            return None;
        };

        let task = Task::new(title);
        self.tasks_by_date
            .entry(key)
            .or_default()
            .push(task.clone());
        info!(
            "event=task_add module=task_store status=ok date_key={} task_id={}",
            key, task.id
        );
        self.save();
        Some(task)
    }

    /// [`add_task`](Self::add_task) on the current local day.
    pub fn add_task_today(&mut self, title: impl Into<String>) -> Option<Task> {
        self.add_task(DateKey::today().date(), title)
    }

    /// Flips completion of task `task_id` under `date_key`.
    ///
    /// Returns whether the task was found; a miss changes nothing.
    pub fn toggle_task(&mut self, date_key: &DateKey, task_id: TaskId) -> bool {
        let Some(task) = self
            .tasks_by_date
            .get_mut(date_key)
            .and_then(|tasks| tasks.iter_mut().find(|task| task.id == task_id))
        else {
            debug!(
                "event=task_toggle module=task_store status=miss date_key={} task_id={}",
                date_key, task_id
            );
            return false;
        };

        task.toggle();
        info!(
            "event=task_toggle module=task_store status=ok date_key={} task_id={} completed={}",
            date_key, task_id, task.completed
        );
        self.save();
        true
    }

    /// Removes task `task_id` under `date_key`, dropping the day once empty.
    ///
    /// Returns whether the task was found; a miss changes nothing.
    pub fn delete_task(&mut self, date_key: &DateKey, task_id: TaskId) -> bool {
        let Some(tasks) = self.tasks_by_date.get_mut(date_key) else {
            debug!(
                "event=task_delete module=task_store status=miss date_key={} task_id={}",
                date_key, task_id
            );
            return false;
        };
        let Some(index) = tasks.iter().position(|task| task.id == task_id) else {
            debug!(
                "event=task_delete module=task_store status=miss date_key={} task_id={}",
                date_key, task_id
            );
            return false;
        };

        tasks.remove(index);
        if tasks.is_empty() {
            self.tasks_by_date.remove(date_key);
        }
        info!(
            "event=task_delete module=task_store status=ok date_key={} task_id={}",
            date_key, task_id
        );
        self.save();
        true
    }

    /// Tasks of `date_key` in insertion order; empty when the day has none.
    pub fn tasks_for(&self, date_key: &DateKey) -> &[Task] {
        self.tasks_by_date
            .get(date_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tasks of the current local day.
    pub fn tasks_today(&self) -> &[Task] {
        self.tasks_for(&DateKey::today())
    }

    /// Every day holding tasks, most recent first.
    pub fn all_date_keys(&self) -> Vec<DateKey> {
        self.tasks_by_date.keys().rev().copied().collect()
    }

    /// Every day with its tasks, most recent first.
    pub fn agenda(&self) -> Vec<(DateKey, &[Task])> {
        self.tasks_by_date
            .iter()
            .rev()
            .map(|(key, tasks)| (*key, tasks.as_slice()))
            .collect()
    }

    /// Total number of tasks across all days.
    pub fn len(&self) -> usize {
        self.tasks_by_date.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks_by_date.is_empty()
    }

    /// Read-only view of the full mapping.
    pub fn snapshot(&self) -> &TaskSnapshot {
        &self.tasks_by_date
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn save(&mut self) {
        let blob = match encode_snapshot(&self.tasks_by_date) {
            Ok(blob) => blob,
            Err(err) => {
                error!(
                    "event=snapshot_save module=task_store status=error error_code=encode_failed error={}",
                    err
                );
                return;
            }
        };

        match self.storage.save(&blob) {
            Ok(()) => debug!(
                "event=snapshot_save module=task_store status=ok bytes={} days={}",
                blob.len(),
                self.tasks_by_date.len()
            ),
            Err(err) => error!(
                "event=snapshot_save module=task_store status=error error_code=write_failed error={}",
                err
            ),
        }
    }
}

fn load<S: SnapshotStore>(storage: &S) -> TaskSnapshot {
    let blob = match storage.load() {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            info!("event=snapshot_load module=task_store status=ok source=empty_slot");
            return TaskSnapshot::new();
        }
        Err(err) => {
            warn!(
                "event=snapshot_load module=task_store status=fallback error_code=read_failed error={}",
                err
            );
            return TaskSnapshot::new();
        }
    };

    match decode_snapshot(&blob) {
        Ok(snapshot) => {
            info!(
                "event=snapshot_load module=task_store status=ok days={} bytes={}",
                snapshot.len(),
                blob.len()
            );
            snapshot
        }
        Err(err) => {
            warn!(
                "event=snapshot_load module=task_store status=fallback error_code=decode_failed error={}",
                err
            );
            TaskSnapshot::new()
        }
    }
}
