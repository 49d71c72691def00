//! Scanner command-line construction.
//!
//! This module owns the boundary between loosely-typed request payloads and
//! the exact argument vector handed to the scanner process:
//! - header normalization (CRLF map serialization, default User-Agent and
//!   Content-Type injection)
//! - body encoding (form-urlencoded, JSON, or raw pass-through)
//! - method inference and injection-parameter inference
//! - explicit tuning emission so scan behavior never depends on the
//!   scanner's own defaults
//! - allow-list filtering of free-form extra arguments
//!
//! The resulting [`ArgumentVector`] is immutable and is always passed to
//! the child process as discrete tokens, never through a shell.

mod allowlist;

pub use allowlist::ALLOWED_FLAGS;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use url::form_urlencoded;

use crate::config::{
    Settings, DEFAULT_USER_AGENT, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE,
};
use crate::error_handling::ValidationError;
use crate::request::{BodyValue, EnumerationFlags, ExtraArgs, HeaderValue, ScanRequest};

/// The exact, ordered token list passed to the scanner process.
///
/// Immutable once built. The first token is the interpreter, the second
/// the scanner script; the rest are scanner options. Tokens are handed to
/// the child process individually, so no shell quoting applies anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArgumentVector {
    tokens: Vec<String>,
}

impl ArgumentVector {
    fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// All tokens in order, interpreter first.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The program to spawn (the first token).
    pub fn program(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    /// Everything after the program token.
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }
}

// Header working copy while defaults are being applied. Resolved to the
// scanner's `--headers` string form at the end.
enum Headers {
    Text(String),
    Map(IndexMap<String, Value>),
}

#[derive(Debug, Clone, Copy, EnumIter)]
enum EnumerationTarget {
    Users,
    Passwords,
    Privileges,
    Roles,
    Dbs,
    Tables,
    Columns,
    Schema,
}

impl EnumerationTarget {
    fn flag(self) -> &'static str {
        match self {
            EnumerationTarget::Users => "--users",
            EnumerationTarget::Passwords => "--passwords",
            EnumerationTarget::Privileges => "--privileges",
            EnumerationTarget::Roles => "--roles",
            EnumerationTarget::Dbs => "--dbs",
            EnumerationTarget::Tables => "--tables",
            EnumerationTarget::Columns => "--columns",
            EnumerationTarget::Schema => "--schema",
        }
    }

    fn enabled(self, flags: &EnumerationFlags) -> bool {
        match self {
            EnumerationTarget::Users => flags.users,
            EnumerationTarget::Passwords => flags.passwords,
            EnumerationTarget::Privileges => flags.privileges,
            EnumerationTarget::Roles => flags.roles,
            EnumerationTarget::Dbs => flags.dbs,
            EnumerationTarget::Tables => flags.tables,
            EnumerationTarget::Columns => flags.columns,
            EnumerationTarget::Schema => flags.schema,
        }
    }
}

/// Builds the scanner argument vector for one request.
///
/// Fails with [`ValidationError::MissingUrl`] when the target URL is
/// missing or empty; this is the only failure mode, and it happens before
/// any process is spawned. Everything else — unknown extra tokens, odd
/// header shapes — degrades rather than fails.
///
/// # Arguments
///
/// * `request` - The scan request to translate
/// * `settings` - Process-wide settings providing the scanner location and
///   tuning defaults
pub fn build_arguments(
    request: &ScanRequest,
    settings: &Settings,
) -> Result<ArgumentVector, ValidationError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(ValidationError::MissingUrl);
    }

    let mut cmd: Vec<String> = vec![
        settings.interpreter.to_string_lossy().into_owned(),
        settings.scanner.to_string_lossy().into_owned(),
        "-u".to_string(),
        url.to_string(),
        "--batch".to_string(),
    ];

    // Working header copy; a missing header set gets a default User-Agent.
    let mut headers = match &request.headers {
        None => {
            let mut map = IndexMap::new();
            map.insert(
                "User-Agent".to_string(),
                Value::String(DEFAULT_USER_AGENT.to_string()),
            );
            Headers::Map(map)
        }
        Some(HeaderValue::Map(map)) => {
            let mut map = map.clone();
            map.entry("User-Agent".to_string())
                .or_insert_with(|| Value::String(DEFAULT_USER_AGENT.to_string()));
            Headers::Map(map)
        }
        Some(HeaderValue::Text(text)) => Headers::Text(text.clone()),
    };

    let body = request.data.as_ref().filter(|b| !b.is_empty());

    if let Some(body) = body {
        // A body with no explicit Content-Type gets one matching the
        // transport mode.
        if let Headers::Map(map) = &mut headers {
            let content_type = if request.json {
                JSON_CONTENT_TYPE
            } else {
                FORM_CONTENT_TYPE
            };
            map.entry("Content-Type".to_string())
                .or_insert_with(|| Value::String(content_type.to_string()));
        }

        let data_str = encode_body(body, request.json, request.raw);
        cmd.push("--data".to_string());
        cmd.push(data_str);
    }

    if let Some(header_str) = serialize_headers(&headers) {
        cmd.push("--headers".to_string());
        cmd.push(header_str);
    }

    // HTTP method: explicit, or POST inferred from a present body.
    let method = request
        .method
        .clone()
        .filter(|m| !m.is_empty())
        .or_else(|| body.map(|_| "POST".to_string()));
    if let Some(method) = method {
        cmd.push("--method".to_string());
        cmd.push(method);
    }

    // Tuning is always emitted explicitly so downstream behavior does not
    // depend on the scanner's own defaults.
    let tuning = &settings.tuning;
    cmd.push("--timeout".to_string());
    cmd.push(request.sqlmap_timeout.unwrap_or(tuning.timeout_secs).to_string());
    cmd.push("--threads".to_string());
    cmd.push(request.threads.unwrap_or(tuning.threads).to_string());
    cmd.push("--level".to_string());
    cmd.push(request.level.unwrap_or(tuning.level).to_string());
    cmd.push("--risk".to_string());
    cmd.push(request.risk.unwrap_or(tuning.risk).to_string());
    if request.smart.unwrap_or(tuning.smart) {
        cmd.push("--smart".to_string());
    }

    // Injection parameter: explicit, else the first key of a map body.
    let param = request
        .param
        .clone()
        .filter(|p| !p.is_empty())
        .or_else(|| match &request.data {
            Some(BodyValue::Map(map)) => map.keys().next().cloned(),
            _ => None,
        });
    if let Some(param) = param {
        cmd.push("-p".to_string());
        cmd.push(param);
    }

    for target in EnumerationTarget::iter() {
        if target.enabled(&request.enumerate) {
            cmd.push(target.flag().to_string());
        }
    }

    // Ambient extra args first, then the request's own; both go through
    // the same allow-list filter.
    if let Some(env_extra) = &settings.extra_args {
        cmd.extend(allowlist::filter_extra_args(&ExtraArgs::Line(
            env_extra.clone(),
        )));
    }
    if let Some(extra) = &request.extra_args {
        cmd.extend(allowlist::filter_extra_args(extra));
    }

    Ok(ArgumentVector::new(cmd))
}

fn encode_body(body: &BodyValue, json_mode: bool, raw_mode: bool) -> String {
    match body {
        BodyValue::Text(text) => text.clone(),
        BodyValue::Map(map) => {
            if json_mode || raw_mode {
                serde_json::to_string(map).unwrap_or_default()
            } else {
                form_encode(map)
            }
        }
    }
}

fn form_encode(map: &IndexMap<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in map {
        serializer.append_pair(key, &scalar_string(value));
    }
    serializer.finish()
}

fn serialize_headers(headers: &Headers) -> Option<String> {
    match headers {
        Headers::Text(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Headers::Map(map) => {
            let parts: Vec<String> = map
                .iter()
                .filter(|(key, value)| !key.is_empty() && !value.is_null())
                .map(|(key, value)| format!("{}: {}", key, scalar_string(value)))
                .collect();
            (!parts.is_empty()).then(|| parts.join("\r\n"))
        }
    }
}

// JSON strings render without quotes; other scalars use their JSON text.
fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            interpreter: "/usr/bin/python3".into(),
            scanner: "/opt/sqlmap/sqlmap.py".into(),
            ..Settings::default()
        }
    }

    fn request(url: &str) -> ScanRequest {
        ScanRequest {
            url: url.to_string(),
            ..ScanRequest::default()
        }
    }

    fn tokens(req: &ScanRequest) -> Vec<String> {
        build_arguments(req, &settings()).unwrap().tokens().to_vec()
    }

    fn value_of<'a>(tokens: &'a [String], flag: &str) -> Option<&'a str> {
        tokens
            .iter()
            .position(|t| t == flag)
            .and_then(|i| tokens.get(i + 1))
            .map(String::as_str)
    }

    #[test]
    fn test_missing_url_fails_validation() {
        let err = build_arguments(&request(""), &settings()).unwrap_err();
        assert_eq!(err, ValidationError::MissingUrl);

        let err = build_arguments(&request("   "), &settings()).unwrap_err();
        assert_eq!(err, ValidationError::MissingUrl);
    }

    #[test]
    fn test_invocation_prefix_and_batch() {
        let cmd = tokens(&request("https://example.com/?id=1"));
        assert_eq!(cmd[0], "/usr/bin/python3");
        assert_eq!(cmd[1], "/opt/sqlmap/sqlmap.py");
        assert_eq!(value_of(&cmd, "-u"), Some("https://example.com/?id=1"));
        assert!(cmd.contains(&"--batch".to_string()));
    }

    #[test]
    fn test_default_user_agent_injected() {
        let cmd = tokens(&request("https://example.com"));
        assert_eq!(value_of(&cmd, "--headers"), Some("User-Agent: Mozilla/5.0"));
    }

    #[test]
    fn test_header_map_crlf_serialization() {
        let req: ScanRequest = serde_json::from_str(
            r#"{"url": "u", "headers": {"X-Test": "1", "X-Other": "2"}}"#,
        )
        .unwrap();
        let cmd = tokens(&req);
        let headers = value_of(&cmd, "--headers").unwrap();
        assert_eq!(headers, "X-Test: 1\r\nX-Other: 2\r\nUser-Agent: Mozilla/5.0");

        // Round-trip: re-splitting on CRLF recovers the original pair
        let first = headers.split("\r\n").next().unwrap();
        let (key, value) = first.split_once(": ").unwrap();
        assert_eq!((key, value), ("X-Test", "1"));
    }

    #[test]
    fn test_header_string_passed_through() {
        let req = ScanRequest {
            headers: Some(HeaderValue::Text("X-Raw: yes\r\nX-More: ok".to_string())),
            ..request("u")
        };
        let cmd = tokens(&req);
        assert_eq!(value_of(&cmd, "--headers"), Some("X-Raw: yes\r\nX-More: ok"));
    }

    #[test]
    fn test_map_body_form_encoded_with_content_type() {
        let req: ScanRequest =
            serde_json::from_str(r#"{"url": "u", "data": {"user": "a b", "pass": "c&d"}}"#)
                .unwrap();
        let cmd = tokens(&req);
        assert_eq!(value_of(&cmd, "--data"), Some("user=a+b&pass=c%26d"));
        let headers = value_of(&cmd, "--headers").unwrap();
        assert!(headers.contains("Content-Type: application/x-www-form-urlencoded"));
    }

    #[test]
    fn test_json_mode_serializes_body_and_header() {
        let req: ScanRequest = serde_json::from_str(
            r#"{"url": "u", "json": true, "data": {"user": "admin", "count": 3}}"#,
        )
        .unwrap();
        let cmd = tokens(&req);
        assert_eq!(
            value_of(&cmd, "--data"),
            Some(r#"{"user":"admin","count":3}"#)
        );
        let headers = value_of(&cmd, "--headers").unwrap();
        assert!(headers.contains("Content-Type: application/json"));
    }

    #[test]
    fn test_raw_mode_passes_text_body_untouched() {
        let req = ScanRequest {
            raw: true,
            data: Some(BodyValue::Text("a=1&weird%payload".to_string())),
            ..request("u")
        };
        let cmd = tokens(&req);
        assert_eq!(value_of(&cmd, "--data"), Some("a=1&weird%payload"));
    }

    #[test]
    fn test_explicit_content_type_not_overridden() {
        let req: ScanRequest = serde_json::from_str(
            r#"{"url": "u", "data": {"a": "1"}, "headers": {"Content-Type": "text/plain"}}"#,
        )
        .unwrap();
        let cmd = tokens(&req);
        let headers = value_of(&cmd, "--headers").unwrap();
        assert!(headers.contains("Content-Type: text/plain"));
        assert!(!headers.contains("x-www-form-urlencoded"));
    }

    #[test]
    fn test_method_explicit_wins() {
        let req = ScanRequest {
            method: Some("PUT".to_string()),
            data: Some(BodyValue::Text("a=1".to_string())),
            ..request("u")
        };
        let cmd = tokens(&req);
        assert_eq!(value_of(&cmd, "--method"), Some("PUT"));
    }

    #[test]
    fn test_method_inferred_post_with_body() {
        let req = ScanRequest {
            data: Some(BodyValue::Text("a=1".to_string())),
            ..request("u")
        };
        let cmd = tokens(&req);
        assert_eq!(value_of(&cmd, "--method"), Some("POST"));
    }

    #[test]
    fn test_no_method_without_body() {
        let cmd = tokens(&request("u"));
        assert!(!cmd.contains(&"--method".to_string()));
    }

    #[test]
    fn test_empty_body_treated_as_absent() {
        let req = ScanRequest {
            data: Some(BodyValue::Text(String::new())),
            ..request("u")
        };
        let cmd = tokens(&req);
        assert!(!cmd.contains(&"--data".to_string()));
        assert!(!cmd.contains(&"--method".to_string()));
    }

    #[test]
    fn test_tuning_defaults_always_emitted() {
        let cmd = tokens(&request("u"));
        assert_eq!(value_of(&cmd, "--timeout"), Some("10"));
        assert_eq!(value_of(&cmd, "--threads"), Some("4"));
        assert_eq!(value_of(&cmd, "--level"), Some("1"));
        assert_eq!(value_of(&cmd, "--risk"), Some("1"));
        assert!(cmd.contains(&"--smart".to_string()));
    }

    #[test]
    fn test_tuning_overrides_win() {
        let req = ScanRequest {
            sqlmap_timeout: Some(30),
            threads: Some(8),
            level: Some(5),
            risk: Some(3),
            smart: Some(false),
            ..request("u")
        };
        let cmd = tokens(&req);
        assert_eq!(value_of(&cmd, "--timeout"), Some("30"));
        assert_eq!(value_of(&cmd, "--threads"), Some("8"));
        assert_eq!(value_of(&cmd, "--level"), Some("5"));
        assert_eq!(value_of(&cmd, "--risk"), Some("3"));
        assert!(!cmd.contains(&"--smart".to_string()));
    }

    #[test]
    fn test_param_explicit() {
        let req = ScanRequest {
            param: Some("id".to_string()),
            ..request("u")
        };
        let cmd = tokens(&req);
        assert_eq!(value_of(&cmd, "-p"), Some("id"));
    }

    #[test]
    fn test_param_inferred_from_first_map_key() {
        let req: ScanRequest = serde_json::from_str(
            r#"{"url": "u", "data": {"username": "a", "password": "b"}}"#,
        )
        .unwrap();
        let cmd = tokens(&req);
        assert_eq!(value_of(&cmd, "-p"), Some("username"));
    }

    #[test]
    fn test_no_param_for_text_body() {
        let req = ScanRequest {
            data: Some(BodyValue::Text("a=1".to_string())),
            ..request("u")
        };
        let cmd = tokens(&req);
        assert!(!cmd.contains(&"-p".to_string()));
    }

    #[test]
    fn test_enumeration_flags() {
        let req: ScanRequest = serde_json::from_str(
            r#"{"url": "u", "dbs": true, "tables": true, "schema": true}"#,
        )
        .unwrap();
        let cmd = tokens(&req);
        assert!(cmd.contains(&"--dbs".to_string()));
        assert!(cmd.contains(&"--tables".to_string()));
        assert!(cmd.contains(&"--schema".to_string()));
        assert!(!cmd.contains(&"--users".to_string()));
        assert!(!cmd.contains(&"--columns".to_string()));
    }

    #[test]
    fn test_unsafe_extra_args_dropped_safe_kept() {
        let req = ScanRequest {
            extra_args: Some(ExtraArgs::Line(
                "--level=3 --os-shell --technique=BEU".to_string(),
            )),
            ..request("u")
        };
        let cmd = tokens(&req);
        assert!(!cmd.iter().any(|t| t.contains("--os-shell")));
        // Safe neighbors survive in original relative order
        let level_pos = cmd.iter().position(|t| t == "--level=3").unwrap();
        let tech_pos = cmd.iter().position(|t| t == "--technique=BEU").unwrap();
        assert!(level_pos < tech_pos);
    }

    #[test]
    fn test_ambient_extra_args_precede_request_ones() {
        let settings = Settings {
            extra_args: Some("--passwords".to_string()),
            ..settings()
        };
        let req = ScanRequest {
            extra_args: Some(ExtraArgs::Line("--skip=csrf".to_string())),
            ..request("u")
        };
        let cmd = build_arguments(&req, &settings).unwrap().tokens().to_vec();
        let env_pos = cmd.iter().position(|t| t == "--passwords").unwrap();
        let req_pos = cmd.iter().position(|t| t == "--skip=csrf").unwrap();
        assert!(env_pos < req_pos);
    }

    #[test]
    fn test_argument_vector_split() {
        let argv = build_arguments(&request("u"), &settings()).unwrap();
        assert_eq!(argv.program(), "/usr/bin/python3");
        assert_eq!(argv.args()[0], "/opt/sqlmap/sqlmap.py");
        assert_eq!(argv.tokens().len(), argv.args().len() + 1);
    }
}
