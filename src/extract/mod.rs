//! Structured extraction from scanner output.
//!
//! The scanner writes human-oriented text; this module recovers machine
//! shape from it:
//! - log lines bucketed by `[INFO]`/`[WARNING]`/`[CRITICAL]` tags
//! - `---`-delimited vulnerable-parameter blocks with their findings
//! - discovered database names, via a three-stage heuristic
//!
//! Extraction is a pure function of the input text: same stdout in, same
//! structures out, no side effects. Every stage is total — a stage that
//! recognizes nothing returns an empty result rather than an error, so
//! unparseable output can never fail a task.

mod databases;
mod parameters;

pub(crate) use databases::extract_databases;
pub(crate) use parameters::extract_parameters;

use regex::Regex;

use crate::report::{DatabaseDiscovery, LogBuckets, ParameterReport};

/// Compiles a static regex pattern, panicking with a detailed message if
/// compilation fails. Only for compile-time-constant patterns, where a
/// failure is a programming error.
pub(crate) fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

/// Everything recovered from one scanner run's stdout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    /// Log lines bucketed by severity tag.
    pub logs: LogBuckets,
    /// Vulnerable-parameter reports in document order.
    pub parameters: Vec<ParameterReport>,
    /// Discovered database names.
    pub databases: DatabaseDiscovery,
}

/// Extracts all structured findings from scanner stdout.
///
/// Deterministic and side-effect free; calling it twice on the same input
/// yields identical results.
pub fn extract(stdout: &str) -> Extraction {
    Extraction {
        logs: classify_log_lines(stdout),
        parameters: extract_parameters(stdout),
        databases: extract_databases(stdout),
    }
}

/// Buckets each output line by the literal severity tags it contains.
///
/// A line containing more than one tag lands in each matching bucket; a
/// line containing none lands nowhere.
fn classify_log_lines(stdout: &str) -> LogBuckets {
    let mut buckets = LogBuckets::default();
    if stdout.is_empty() {
        return buckets;
    }
    for line in stdout.lines() {
        if line.contains("[INFO]") {
            buckets.info.push(line.to_string());
        }
        if line.contains("[WARNING]") {
            buckets.warning.push(line.to_string());
        }
        if line.contains("[CRITICAL]") {
            buckets.critical.push(line.to_string());
        }
    }
    buckets
}
