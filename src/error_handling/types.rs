//! Error type definitions.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors raised while validating a scan request, before any process is
/// spawned.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The request has no target URL (missing or empty after trimming).
    #[error("URL is required.")]
    MissingUrl,
}

/// Per-task execution failures.
///
/// Each variant maps to one failure mode of running the scanner as a child
/// process. These never propagate out of a batch; the coordinator converts
/// them into `ok=false` entries for the affected index only.
#[derive(Error, Debug)]
pub enum TaskError {
    /// The request failed validation; nothing was spawned.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The scanner executable or its interpreter could not be found.
    #[error("Executable not found: {0}")]
    Spawn(std::io::Error),

    /// The process exceeded its wall-clock budget and was terminated.
    #[error("sqlmap execution timed out")]
    Timeout,

    /// Any other spawn or I/O fault while running the child process.
    #[error("Unexpected error: {0}")]
    Runtime(std::io::Error),
}

impl TaskError {
    /// Classifies a spawn-time I/O error: `NotFound` becomes the distinct
    /// spawn error, everything else is a runtime fault.
    pub fn from_spawn_io(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            TaskError::Spawn(err)
        } else {
            TaskError::Runtime(err)
        }
    }
}
