//! Domain model for the date-keyed to-do list.
//!
//! # Responsibility
//! - Define the task record and the day-granularity key that groups tasks.
//! - Own the persisted snapshot shape of the whole mapping.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - A `DateKey` always names a valid calendar day.

pub mod date_key;
pub mod snapshot;
pub mod task;
