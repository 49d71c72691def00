//! Configuration types and CLI options.
//!
//! This module defines the process-wide [`Settings`] struct (loaded once
//! from the environment at startup), the per-command tuning defaults, and
//! the enums and structs used for command-line argument parsing.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::*;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options for the `sqlmap_runner` binary.
#[derive(Parser, Debug)]
#[command(
    name = "sqlmap_runner",
    about = "Run the sqlmap scanner against target URLs and extract structured findings"
)]
pub struct Opt {
    /// Request file: a JSON object (single scan) or array (batch), or '-' for stdin
    pub file: PathBuf,

    /// Treat the input file as a newline-delimited list of target URLs
    /// (blank lines and lines starting with '#' are skipped)
    #[arg(long)]
    pub urls: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Override the worker-pool concurrency for this run
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Write the JSON result to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Default tuning values emitted on every scanner command line.
///
/// These are always passed explicitly so scan behavior does not depend on
/// the scanner's own defaults. Per-request overrides win over these; these
/// win over the built-in constants.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningDefaults {
    /// Scanner-side HTTP timeout in seconds (`--timeout`)
    pub timeout_secs: u32,
    /// Scanner thread count (`--threads`)
    pub threads: u32,
    /// Detection level (`--level`)
    pub level: u32,
    /// Risk level (`--risk`)
    pub risk: u32,
    /// Smart heuristic toggle (`--smart`)
    pub smart: bool,
}

impl Default for TuningDefaults {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_SCANNER_TIMEOUT_SECS,
            threads: DEFAULT_SCANNER_THREADS,
            level: DEFAULT_SCANNER_LEVEL,
            risk: DEFAULT_SCANNER_RISK,
            smart: DEFAULT_SCANNER_SMART,
        }
    }
}

/// Process-wide settings, read once from the environment at startup.
///
/// Holds everything the orchestration core needs that is not part of an
/// individual request: the scanner location, the worker-pool default, the
/// per-process timeout, tuning defaults, and ambient extra arguments. The
/// struct is plain data; pass it by reference into the coordinator rather
/// than re-reading the environment per call.
///
/// # Examples
///
/// ```no_run
/// use sqlmap_runner::Settings;
///
/// let settings = Settings::from_env();
/// assert!(settings.max_concurrency >= 1);
/// ```
#[derive(Debug, Clone)]
pub struct Settings {
    /// Interpreter that runs the scanner (first argv token)
    pub interpreter: PathBuf,

    /// Path to the scanner script (second argv token)
    pub scanner: PathBuf,

    /// Default worker-pool size for batch runs
    pub max_concurrency: usize,

    /// Wall-clock budget for one scanner process
    pub process_timeout: Duration,

    /// Tuning values used when a request does not override them
    pub tuning: TuningDefaults,

    /// Ambient extra arguments appended to every command, allow-list
    /// filtered like caller-supplied ones
    pub extra_args: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from(DEFAULT_INTERPRETER),
            scanner: PathBuf::from(DEFAULT_SCANNER),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            process_timeout: Duration::from_secs(DEFAULT_PROCESS_TIMEOUT_SECS),
            tuning: TuningDefaults::default(),
            extra_args: None,
        }
    }
}

impl Settings {
    /// Loads settings from the environment, falling back to built-in
    /// defaults for anything unset or unparseable.
    ///
    /// Unparseable numeric values fall back silently to the default rather
    /// than failing startup, matching the permissive handling of the
    /// wrapped deployment knobs.
    pub fn from_env() -> Self {
        let tuning = TuningDefaults {
            timeout_secs: env_parse(ENV_DEFAULT_TIMEOUT, DEFAULT_SCANNER_TIMEOUT_SECS),
            threads: env_parse(ENV_DEFAULT_THREADS, DEFAULT_SCANNER_THREADS),
            level: env_parse(ENV_DEFAULT_LEVEL, DEFAULT_SCANNER_LEVEL),
            risk: env_parse(ENV_DEFAULT_RISK, DEFAULT_SCANNER_RISK),
            smart: env_flag(ENV_DEFAULT_SMART, DEFAULT_SCANNER_SMART),
        };

        Self {
            interpreter: PathBuf::from(env_string(ENV_INTERPRETER, DEFAULT_INTERPRETER)),
            scanner: PathBuf::from(env_string(ENV_SCANNER, DEFAULT_SCANNER)),
            max_concurrency: env_parse(ENV_MAX_CONCURRENCY, DEFAULT_MAX_CONCURRENCY).max(1),
            process_timeout: Duration::from_secs(env_parse(
                ENV_PROCESS_TIMEOUT,
                DEFAULT_PROCESS_TIMEOUT_SECS,
            )),
            tuning,
            extra_args: env::var(ENV_EXTRA_ARGS)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        }
    }
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: FromStr + Copy>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Parses a boolean-ish environment flag: "1", "true", "yes", "on"
/// (case-insensitive) enable it; anything else present disables it.
fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
