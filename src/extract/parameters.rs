//! Vulnerable-parameter block parsing.
//!
//! The scanner wraps each vulnerable-parameter report in a pair of literal
//! `---` lines:
//!
//! ```text
//! ---
//! Parameter: id (GET)
//!     Type: boolean-based blind
//!     Title: AND boolean-based blind - WHERE or HAVING clause
//!     Payload: id=1 AND 1=1
//! ---
//! ```
//!
//! Blocks are split out in document order with a non-greedy, newline-
//! spanning, case-insensitive pattern, then parsed independently.

use std::sync::LazyLock;

use regex::Regex;

use super::compile_regex_unsafe;
use crate::report::{Finding, ParameterReport};

static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?is)---\n(Parameter:.*?)\n---", "BLOCK_RE"));

static PARAM_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"(?i)^Parameter:\s*(?P<name>[\w\-\._]+)\s*(?:\((?P<loc>[^)]+)\))?",
        "PARAM_LINE_RE",
    )
});

/// Extracts every `---`-delimited parameter block, tagged with its 0-based
/// document position.
pub(crate) fn extract_parameters(stdout: &str) -> Vec<ParameterReport> {
    if stdout.is_empty() {
        return Vec::new();
    }
    BLOCK_RE
        .captures_iter(stdout)
        .filter_map(|captures| captures.get(1))
        .enumerate()
        .map(|(index, block)| parse_parameter_block(block.as_str(), index))
        .collect()
}

/// Parses one raw block into a report.
///
/// The first line names the parameter (location optional). Subsequent
/// non-blank lines group into findings: `Type:` opens a new finding
/// (flushing any open one), `Title:`/`Payload:` fill the open finding or
/// open an anonymous one, and any other line continues an open payload —
/// this is what keeps multi-line payloads (e.g. encoded SQL) intact.
fn parse_parameter_block(raw_block: &str, index: usize) -> ParameterReport {
    let mut lines = raw_block.lines();
    let first_line = lines.next().unwrap_or_default().trim();

    let (parameter, location) = match PARAM_LINE_RE.captures(first_line) {
        Some(captures) => (
            captures.name("name").map(|m| m.as_str().to_string()),
            captures.name("loc").map(|m| m.as_str().trim().to_string()),
        ),
        None => (None, None),
    };

    let mut findings: Vec<Finding> = Vec::new();
    let mut current: Option<Finding> = None;

    for raw_line in lines {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();
        if lower.starts_with("type:") {
            if let Some(finding) = current.take() {
                findings.push(finding);
            }
            current = Some(Finding {
                kind: Some(line["Type:".len()..].trim().to_string()),
                title: None,
                payload: None,
            });
        } else if lower.starts_with("title:") {
            let title = line["Title:".len()..].trim().to_string();
            match current.as_mut() {
                Some(finding) => finding.title = Some(title),
                None => {
                    current = Some(Finding {
                        kind: None,
                        title: Some(title),
                        payload: None,
                    })
                }
            }
        } else if lower.starts_with("payload:") {
            let payload = line["Payload:".len()..].trim().to_string();
            match current.as_mut() {
                Some(finding) => finding.payload = Some(payload),
                None => {
                    current = Some(Finding {
                        kind: None,
                        title: None,
                        payload: Some(payload),
                    })
                }
            }
        } else if let Some(finding) = current.as_mut() {
            // Continuation line: only meaningful while a payload is open
            if let Some(payload) = finding.payload.as_mut() {
                payload.push('\n');
                payload.push_str(line);
            }
        }
    }
    if let Some(finding) = current.take() {
        findings.push(finding);
    }

    ParameterReport {
        parameter,
        location,
        raw: raw_block.trim().to_string(),
        findings,
        index,
    }
}
