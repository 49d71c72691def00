//! Startup initialization.
//!
//! This module provides logger setup for the binary. The library itself
//! only uses the `log` facade; embedders bring their own logger.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
