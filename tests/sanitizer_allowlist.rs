//! Tests for the extra-argument security boundary through the public API.
//!
//! Unsafe tokens must disappear silently without affecting adjacent safe
//! tokens, and nothing outside the allow-list may ever reach the built
//! argument vector from the free-form extra-argument field.

use sqlmap_runner::{build_arguments, ScanRequest, Settings, ALLOWED_FLAGS};

fn settings() -> Settings {
    Settings {
        interpreter: "/usr/bin/python3".into(),
        scanner: "/opt/sqlmap/sqlmap.py".into(),
        ..Settings::default()
    }
}

fn request_with_extra(extra: serde_json::Value) -> ScanRequest {
    serde_json::from_value(serde_json::json!({
        "url": "https://example.com/?id=1",
        "extraArgs": extra,
    }))
    .unwrap()
}

/// Tokens the sanitizer emits regardless of extra arguments, for the same
/// request with extras removed.
fn baseline_len() -> usize {
    let request = request_with_extra(serde_json::Value::Null);
    build_arguments(&request, &settings()).unwrap().tokens().len()
}

#[test]
fn test_unsafe_token_dropped_neighbors_survive() {
    let request = request_with_extra(serde_json::json!("--level=3 --os-shell --risk=2"));
    let argv = build_arguments(&request, &settings()).unwrap();
    let tokens = argv.tokens();

    assert!(!tokens.iter().any(|t| t.contains("os-shell")));
    let level = tokens.iter().position(|t| t == "--level=3").unwrap();
    let risk = tokens.iter().position(|t| t == "--risk=2").unwrap();
    assert!(level < risk, "safe neighbors keep their relative order");
}

#[test]
fn test_shell_injection_tokens_never_survive() {
    let request = request_with_extra(serde_json::json!(
        "--dbs; rm -rf / $(curl evil) `id` && --batch"
    ));
    let argv = build_arguments(&request, &settings()).unwrap();
    let extras = &argv.tokens()[baseline_len()..];
    assert_eq!(extras, ["--batch"], "only the allow-listed token survives");
}

#[test]
fn test_list_form_filtered_identically() {
    let request = request_with_extra(serde_json::json!([
        "--technique=BEU",
        "--tamper=space2comment",
        "--start=5"
    ]));
    let argv = build_arguments(&request, &settings()).unwrap();
    let extras = &argv.tokens()[baseline_len()..];
    assert_eq!(extras, ["--technique=BEU", "--start=5"]);
}

#[test]
fn test_request_never_fails_from_unsafe_extras() {
    let request = request_with_extra(serde_json::json!("$(reboot) ; DROP TABLE users --"));
    let argv = build_arguments(&request, &settings()).unwrap();
    assert_eq!(argv.tokens().len(), baseline_len());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extra_tokens_are_always_allowlisted(
            tokens in prop::collection::vec("[ -~]{0,24}", 0..12)
        ) {
            let request = request_with_extra(serde_json::json!(tokens));
            let argv = build_arguments(&request, &settings()).unwrap();
            let extras = &argv.tokens()[baseline_len()..];

            for token in extras {
                prop_assert!(token.starts_with('-'));
                let flag_name = token.split('=').next().unwrap();
                prop_assert!(
                    ALLOWED_FLAGS.contains(&flag_name),
                    "token {:?} escaped the allow-list", token
                );
            }
        }

        #[test]
        fn free_form_strings_never_break_the_build(raw in "[ -~]{0,200}") {
            let request = request_with_extra(serde_json::json!(raw));
            // Building must succeed for any printable extra-args string
            let argv = build_arguments(&request, &settings()).unwrap();
            prop_assert!(argv.tokens().len() >= baseline_len());
        }
    }
}
