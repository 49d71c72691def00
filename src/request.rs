//! Scan request model.
//!
//! The request payload arrives from collaborators (an HTTP layer, a job
//! queue, the CLI) as loosely-typed JSON: headers and body may be either a
//! pre-formatted string or a key/value map, extra arguments may be a single
//! string or a token list. The duck-typed fields are represented as tagged
//! unions here and resolved once at the sanitizer boundary; everything
//! downstream sees normalized strings.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// A header set: either a pre-formatted header string (passed to the
/// scanner as-is) or a key/value map serialized as CRLF-joined
/// `Key: Value` lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    /// Already-formatted header text.
    Text(String),
    /// Key/value pairs, insertion order preserved.
    Map(IndexMap<String, Value>),
}

/// A request body: either literal text or a key/value map whose encoding
/// depends on the transport mode (form-urlencoded by default, JSON text in
/// JSON mode).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BodyValue {
    /// Literal body text.
    Text(String),
    /// Key/value pairs, insertion order preserved. The first key doubles
    /// as the inferred injection parameter when none is given explicitly.
    Map(IndexMap<String, Value>),
}

impl BodyValue {
    /// True for an absent-equivalent body: empty text or an empty map.
    pub fn is_empty(&self) -> bool {
        match self {
            BodyValue::Text(s) => s.is_empty(),
            BodyValue::Map(m) => m.is_empty(),
        }
    }
}

/// Free-form extra arguments: a raw string (shell-token-split before
/// filtering) or an explicit token list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExtraArgs {
    /// One string of whitespace/quote-delimited tokens.
    Line(String),
    /// Pre-split tokens.
    List(Vec<String>),
}

/// Boolean enumeration switches, each mapping to one scanner
/// data-enumeration flag when set.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct EnumerationFlags {
    /// List database users (`--users`)
    pub users: bool,
    /// List user password hashes (`--passwords`)
    pub passwords: bool,
    /// List user privileges (`--privileges`)
    pub privileges: bool,
    /// List user roles (`--roles`)
    pub roles: bool,
    /// List databases (`--dbs`)
    pub dbs: bool,
    /// List tables (`--tables`)
    pub tables: bool,
    /// List columns (`--columns`)
    pub columns: bool,
    /// Dump the schema (`--schema`)
    pub schema: bool,
}

/// One scan request: a target URL plus optional transport, enumeration and
/// tuning fields.
///
/// Field names follow the wire format of the wrapped API, so a request
/// deserializes directly from collaborator JSON. Every field except `url`
/// is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanRequest {
    /// Target URL. Required; an empty string fails validation before any
    /// process is spawned.
    pub url: String,

    /// Injection parameter name (`-p`). When absent and the body is a map,
    /// the first map key is used instead.
    pub param: Option<String>,

    /// Request body, literal or key/value map.
    pub data: Option<BodyValue>,

    /// Request headers, pre-formatted or key/value map.
    pub headers: Option<HeaderValue>,

    /// Explicit HTTP method. When absent, POST is inferred if a body is
    /// present.
    pub method: Option<String>,

    /// JSON transport mode: map bodies are serialized to JSON text and a
    /// JSON Content-Type is injected.
    pub json: bool,

    /// Raw transport mode: the body value is passed through untouched.
    pub raw: bool,

    /// Enumeration switches.
    #[serde(flatten)]
    pub enumerate: EnumerationFlags,

    /// Free-form extra arguments, allow-list filtered before use.
    #[serde(rename = "extraArgs")]
    pub extra_args: Option<ExtraArgs>,

    /// Scanner-side HTTP timeout override in seconds (`--timeout`).
    pub sqlmap_timeout: Option<u32>,

    /// Scanner thread count override (`--threads`).
    pub threads: Option<u32>,

    /// Detection level override (`--level`).
    pub level: Option<u32>,

    /// Risk level override (`--risk`).
    pub risk: Option<u32>,

    /// Smart-heuristic override (`--smart`).
    pub smart: Option<bool>,

    /// Worker-pool override for a batch; only the first request of a batch
    /// is consulted.
    #[serde(rename = "maxConcurrency")]
    pub max_concurrency: Option<usize>,
}

impl ScanRequest {
    /// Builds a minimal request for one target URL with database
    /// enumeration enabled, as used by plain URL-list scans.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            enumerate: EnumerationFlags {
                dbs: true,
                ..EnumerationFlags::default()
            },
            ..Self::default()
        }
    }
}
