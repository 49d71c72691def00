//! Allow-list filtering for caller-supplied extra arguments.
//!
//! Free-form extra arguments are the one place where caller input reaches
//! the scanner command line without a dedicated field, so they pass through
//! a fixed allow-list. Tokens that fail any check are dropped silently; the
//! request as a whole never fails because of an unsafe token.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::compile_regex_unsafe;
use crate::request::ExtraArgs;

/// Scanner flags permitted to originate from free-form extra arguments.
pub const ALLOWED_FLAGS: &[&str] = &[
    "--level",
    "--risk",
    "--threads",
    "--timeout",
    "--technique",
    "--smart",
    "-p",
    "--dbs",
    "--batch",
    "--skip",
    "--start",
    "--passwords",
    "--password",
];

// One or two leading dashes, a flag body of alphanumerics/-/./_//, then an
// optional =value tail.
static EXTRA_ARG_SAFE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"^-{1,2}[A-Za-z0-9\-\._/]+=?.*$", "EXTRA_ARG_SAFE_RE")
});

/// Splits and filters free-form extra arguments down to the safe subset.
///
/// A raw string is shell-token-split first; if splitting fails (e.g.
/// unbalanced quotes) the whole string is treated as a single candidate
/// token. Each candidate survives only if it is non-empty after trimming,
/// begins with `-`, matches the restrictive token shape, and its flag name
/// (the text before any `=`) is in [`ALLOWED_FLAGS`]. Rejected tokens
/// disappear without affecting their neighbors.
pub fn filter_extra_args(raw: &ExtraArgs) -> Vec<String> {
    let tokens: Vec<String> = match raw {
        ExtraArgs::Line(s) => {
            if s.is_empty() {
                return Vec::new();
            }
            shlex::split(s).unwrap_or_else(|| vec![s.clone()])
        }
        ExtraArgs::List(list) => list.clone(),
    };

    let mut safe_tokens = Vec::new();
    for token in &tokens {
        let t = token.trim();
        if t.is_empty() {
            continue;
        }
        if !t.starts_with('-') {
            continue;
        }
        if !EXTRA_ARG_SAFE_RE.is_match(t) {
            continue;
        }
        let flag_name = t.split_once('=').map_or(t, |(name, _)| name);
        if !ALLOWED_FLAGS.contains(&flag_name) {
            continue;
        }
        safe_tokens.push(t.to_string());
    }
    safe_tokens
}
