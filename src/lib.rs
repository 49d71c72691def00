//! sqlmap_runner library: sqlmap orchestration and output extraction
//!
//! This library runs the external sqlmap scanner against one or more target
//! URLs and turns its free-form output into structured findings. It provides:
//!
//! - safe construction of the scanner command line from a request payload,
//!   including an allow-list boundary for caller-supplied extra arguments
//! - bounded-concurrency execution of the scanner as isolated child
//!   processes with per-task timeouts and failure isolation
//! - a deterministic extractor that recovers vulnerable-parameter reports,
//!   discovered database names, and log-level buckets from scanner stdout
//!
//! # Example
//!
//! ```no_run
//! use sqlmap_runner::{run_single, ScanRequest, Settings};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let settings = Settings::from_env();
//! let request = ScanRequest {
//!     url: "https://example.com/item.php?id=1".to_string(),
//!     ..Default::default()
//! };
//!
//! let result = run_single(request, &settings).await;
//! println!("ok={} databases={:?}", result.ok, result.databases.names);
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context. The scanner itself and its interpreter are located through
//! [`Settings`], typically from the `SQLMAP_PATH` and `PYTHON_PATH`
//! environment variables.

#![warn(missing_docs)]

mod command;
pub mod config;
mod coordinator;
mod error_handling;
mod extract;
pub mod initialization;
mod report;
mod request;
mod runner;

// Re-export public API
pub use command::{build_arguments, ArgumentVector, ALLOWED_FLAGS};
pub use config::{LogFormat, LogLevel, Settings, TuningDefaults};
pub use coordinator::{run_batch, run_single, run_urls};
pub use error_handling::{TaskError, ValidationError};
pub use extract::{extract, Extraction};
pub use report::{
    BatchEntry, BatchResult, DatabaseDiscovery, Finding, LogBuckets, ParameterReport, ScanResult,
};
pub use request::{BodyValue, EnumerationFlags, ExtraArgs, HeaderValue, ScanRequest};
