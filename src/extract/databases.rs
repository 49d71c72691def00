//! Database-name discovery.
//!
//! None of the scanner's output signals is guaranteed present, so discovery
//! layers three sources in strict priority order:
//!
//! 1. a literal `available databases [N]` marker — N is the authoritative
//!    count even when fewer names are actually found
//! 2. `[*]` bullet lines carrying a bare (optionally backticked) name
//! 3. only if no bullets matched: `resumed: '<value>'` lines from the
//!    scanner's session resume log, skipping purely numeric values (those
//!    are row counts, not names)
//!
//! Names are kept unique in first-seen order; `raw_matches` keeps every
//! match before de-duplication.

use std::sync::LazyLock;

use regex::Regex;

use super::compile_regex_unsafe;
use crate::report::DatabaseDiscovery;

static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)available databases\s*\[(\d+)\]", "COUNT_RE"));

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"^\s*\[\*\]\s*`?([A-Za-z0-9_\-\.]+)`?\s*$",
        "BULLET_RE",
    )
});

static RESUMED_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)resumed:\s*'?(?P<val>[^']+)'?", "RESUMED_RE"));

/// Recovers discovered database names from scanner stdout.
pub(crate) fn extract_databases(stdout: &str) -> DatabaseDiscovery {
    if stdout.is_empty() {
        return DatabaseDiscovery::default();
    }

    let reported_count = COUNT_RE
        .captures(stdout)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok());

    let mut names: Vec<String> = Vec::new();
    let mut raw_matches: Vec<String> = Vec::new();

    for line in stdout.lines() {
        if let Some(captures) = BULLET_RE.captures(line) {
            let name = captures[1].trim().to_string();
            raw_matches.push(name.clone());
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    // Resume-log fallback, only when no bullet-shaped names were found
    if names.is_empty() {
        for line in stdout.lines() {
            if let Some(captures) = RESUMED_RE.captures(line) {
                let value = captures["val"].trim().trim_matches(['\'', '"']).to_string();
                if value.is_empty() || value.chars().all(|c| c.is_ascii_digit()) {
                    continue;
                }
                raw_matches.push(value.clone());
                if !names.contains(&value) {
                    names.push(value);
                }
            }
        }
    }

    let count = reported_count.unwrap_or(names.len());
    DatabaseDiscovery {
        names,
        count,
        raw_matches,
    }
}
