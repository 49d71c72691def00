//! Configuration constants.
//!
//! Defaults and fixed limits for scanner orchestration. Every default here
//! can be overridden per-process via environment variables (see
//! [`super::Settings`]) and, for tuning values, per-request.

/// Maximum captured length of each output stream in characters (2,000,000).
/// Stdout and stderr are truncated independently; anything beyond the cap is
/// replaced by [`TRUNCATION_MARKER`].
pub const MAX_CAPTURED_OUTPUT_CHARS: usize = 2_000_000;

/// Marker appended to a captured stream that exceeded the output cap.
pub const TRUNCATION_MARKER: &str = "\n... [truncated]";

/// Default number of scanner processes running at once for a batch.
pub const DEFAULT_MAX_CONCURRENCY: usize = 3;

/// Default wall-clock budget for one scanner process, in seconds.
pub const DEFAULT_PROCESS_TIMEOUT_SECS: u64 = 300;

/// Default scanner-side HTTP timeout in seconds (`--timeout`).
pub const DEFAULT_SCANNER_TIMEOUT_SECS: u32 = 10;

/// Default scanner thread count (`--threads`).
pub const DEFAULT_SCANNER_THREADS: u32 = 4;

/// Default scanner detection level (`--level`).
pub const DEFAULT_SCANNER_LEVEL: u32 = 1;

/// Default scanner risk level (`--risk`).
pub const DEFAULT_SCANNER_RISK: u32 = 1;

/// Whether the scanner's smart heuristic (`--smart`) is enabled by default.
pub const DEFAULT_SCANNER_SMART: bool = true;

/// User-Agent header injected when a request carries no headers at all.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Content-Type injected for a request body with no explicit Content-Type.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Content-Type injected when the caller requested JSON transport mode.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Fallback interpreter used when `PYTHON_PATH` is not set.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Fallback scanner script path used when `SQLMAP_PATH` is not set.
pub const DEFAULT_SCANNER: &str = "sqlmap.py";

// Environment variable names, read once at startup.
/// Path to the Python interpreter that runs the scanner.
pub const ENV_INTERPRETER: &str = "PYTHON_PATH";
/// Path to the sqlmap script.
pub const ENV_SCANNER: &str = "SQLMAP_PATH";
/// Default worker-pool size for batches.
pub const ENV_MAX_CONCURRENCY: &str = "SQLMAP_MAX_CONCURRENCY";
/// Per-process wall-clock timeout in seconds.
pub const ENV_PROCESS_TIMEOUT: &str = "SQLMAP_PROCESS_TIMEOUT";
/// Default scanner-side HTTP timeout in seconds.
pub const ENV_DEFAULT_TIMEOUT: &str = "SQLMAP_DEFAULT_TIMEOUT";
/// Default scanner thread count.
pub const ENV_DEFAULT_THREADS: &str = "SQLMAP_DEFAULT_THREADS";
/// Default scanner detection level.
pub const ENV_DEFAULT_LEVEL: &str = "SQLMAP_DEFAULT_LEVEL";
/// Default scanner risk level.
pub const ENV_DEFAULT_RISK: &str = "SQLMAP_DEFAULT_RISK";
/// Default smart-heuristic toggle ("1"/"true"/"yes"/"on" enable it).
pub const ENV_DEFAULT_SMART: &str = "SQLMAP_DEFAULT_SMART";
/// Ambient extra arguments appended to every command (allow-list filtered).
pub const ENV_EXTRA_ARGS: &str = "SQLMAP_EXTRA_ARGS";
