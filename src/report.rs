//! Scan result model.
//!
//! Everything the core hands back to collaborators: per-target results with
//! extracted findings, and the order-preserving batch envelope. All types
//! serialize with the wire field names of the wrapped API (`exitCode`,
//! `logMatches`, `parametersRaw`, `listDb`) so downstream persistence and
//! rendering see an unchanged shape.

use serde::Serialize;

use crate::command::ArgumentVector;

/// One extracted vulnerability detail within a parameter report.
///
/// A finding opens on a `Type:` line; `Title:`/`Payload:` lines fill it in.
/// A `Title:`/`Payload:` line with no open finding opens an anonymous one,
/// which is why every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Finding {
    /// Injection technique type (e.g. "boolean-based blind").
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Human-readable finding title.
    pub title: Option<String>,
    /// The payload that triggered the finding; may span multiple lines.
    pub payload: Option<String>,
}

/// One `---`-delimited vulnerable-parameter block from scanner output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterReport {
    /// Parameter name from the block's `Parameter:` line.
    pub parameter: Option<String>,
    /// Parameter location (e.g. "GET", "POST"), when present.
    pub location: Option<String>,
    /// The raw block text, trimmed.
    pub raw: String,
    /// Findings in block order.
    pub findings: Vec<Finding>,
    /// 0-based position of this block in the document.
    pub index: usize,
}

/// Database names recovered from scanner output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct DatabaseDiscovery {
    /// Unique names in first-seen order.
    pub names: Vec<String>,
    /// Reported count: the scanner's own `available databases [N]` figure
    /// when present, otherwise the number of names collected.
    pub count: usize,
    /// Every raw match before de-duplication.
    #[serde(rename = "rawMatches")]
    pub raw_matches: Vec<String>,
}

/// Scanner log lines bucketed by severity tag.
///
/// A line lands in every bucket whose literal tag it contains, and in none
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct LogBuckets {
    /// Lines containing `[INFO]`.
    #[serde(rename = "INFO")]
    pub info: Vec<String>,
    /// Lines containing `[WARNING]`.
    #[serde(rename = "WARNING")]
    pub warning: Vec<String>,
    /// Lines containing `[CRITICAL]`.
    #[serde(rename = "CRITICAL")]
    pub critical: Vec<String>,
}

/// The outcome of one scan request, produced exactly once per request.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// True iff the scanner exited with code zero.
    pub ok: bool,

    /// Child process exit code; absent when the process never completed
    /// (validation failure, spawn failure, timeout).
    #[serde(rename = "exitCode", skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    /// The argument vector that was (or would have been) executed; absent
    /// only when the request failed validation before one was built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<ArgumentVector>,

    /// Captured standard output, truncated to the configured cap.
    pub stdout: String,

    /// Captured standard error, truncated to the configured cap.
    pub stderr: String,

    /// Log lines bucketed by severity.
    #[serde(rename = "logMatches")]
    pub log_matches: LogBuckets,

    /// Vulnerable-parameter reports in document order.
    #[serde(rename = "parametersRaw")]
    pub parameters: Vec<ParameterReport>,

    /// Discovered databases.
    #[serde(rename = "listDb")]
    pub databases: DatabaseDiscovery,

    /// Descriptive error when the task did not complete normally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResult {
    /// Builds a failure result carrying a descriptive error and, when one
    /// was built before the failure, the attempted argument vector.
    pub fn failure(error: impl Into<String>, command: Option<ArgumentVector>) -> Self {
        Self {
            ok: false,
            exit_code: None,
            command,
            stdout: String::new(),
            stderr: String::new(),
            log_matches: LogBuckets::default(),
            parameters: Vec::new(),
            databases: DatabaseDiscovery::default(),
            error: Some(error.into()),
        }
    }
}

/// One member of a batch, tagged with its original request index.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    /// Original 0-based position in the request list.
    pub index: usize,
    /// The target URL of the request, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The per-target result.
    #[serde(flatten)]
    pub result: ScanResult,
}

/// The aggregate outcome of a batch, always in original request order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    /// True iff every member result is ok.
    pub ok: bool,
    /// Member results sorted by original index, regardless of completion
    /// order.
    pub results: Vec<BatchEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_result_shape() {
        let result = ScanResult::failure("URL is required.", None);
        assert!(!result.ok);
        assert!(result.exit_code.is_none());
        assert!(result.command.is_none());
        assert_eq!(result.error.as_deref(), Some("URL is required."));
        assert!(result.parameters.is_empty());
        assert_eq!(result.databases.count, 0);
    }

    #[test]
    fn test_result_serializes_wire_names() {
        let result = ScanResult {
            ok: true,
            exit_code: Some(0),
            command: None,
            stdout: String::new(),
            stderr: String::new(),
            log_matches: LogBuckets::default(),
            parameters: Vec::new(),
            databases: DatabaseDiscovery::default(),
            error: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["exitCode"], 0);
        assert!(json.get("logMatches").is_some());
        assert!(json.get("parametersRaw").is_some());
        assert!(json.get("listDb").is_some());
        // Absent optionals stay off the wire
        assert!(json.get("error").is_none());
        assert!(json.get("command").is_none());
    }

    #[test]
    fn test_finding_type_serializes_as_type() {
        let finding = Finding {
            kind: Some("boolean-based blind".into()),
            title: None,
            payload: None,
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["type"], "boolean-based blind");
    }
}
