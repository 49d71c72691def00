//! Error handling.
//!
//! This module defines the error taxonomy for scan orchestration:
//! - **ValidationError**: malformed requests, surfaced before any process
//!   is spawned
//! - **TaskError**: per-task execution failures (spawn, timeout, runtime)
//! - **InitializationError**: logger/startup failures in the binary
//!
//! Only validation can stop a task from starting. Every other failure is
//! converted into a per-task `ok=false` result so one bad target never
//! aborts its siblings.

mod types;

// Re-export public API
pub use types::{InitializationError, TaskError, ValidationError};
