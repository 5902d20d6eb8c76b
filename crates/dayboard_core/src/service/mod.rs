//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model and storage into the operations UI/FFI layers call.
//! - Keep callers decoupled from the chosen storage slot.

pub mod task_store;
