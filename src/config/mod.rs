//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (output caps, default tuning values, env names)
//! - Process-wide settings loaded once from the environment
//! - CLI option types and log level/format enums

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{LogFormat, LogLevel, Opt, Settings, TuningDefaults};
