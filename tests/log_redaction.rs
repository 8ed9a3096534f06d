//! Tool-call argument logging is capped at 500 characters.

use serde_json::json;

use spiker_mcp_server::handlers::redact::{
    loggable_arguments, truncate_for_log, MAX_LOGGED_ARGUMENT_CHARS, TRUNCATION_MARKER,
};

#[test]
fn short_text_is_logged_unmodified() {
    assert_eq!(truncate_for_log(""), "");
    assert_eq!(truncate_for_log("abc"), "abc");
}

#[test]
fn boundary_lengths() {
    let exact = "a".repeat(MAX_LOGGED_ARGUMENT_CHARS);
    assert_eq!(truncate_for_log(&exact), exact, "500 characters must not be truncated");

    let over = "b".repeat(MAX_LOGGED_ARGUMENT_CHARS + 1);
    let logged = truncate_for_log(&over);
    assert_eq!(logged, format!("{}... (truncated)", "b".repeat(MAX_LOGGED_ARGUMENT_CHARS)));
}

#[test]
fn truncation_counts_characters_not_bytes() {
    let text = "é".repeat(MAX_LOGGED_ARGUMENT_CHARS + 10);
    let logged = truncate_for_log(&text);

    let kept = logged.strip_suffix(TRUNCATION_MARKER).unwrap();
    assert_eq!(kept.chars().count(), MAX_LOGGED_ARGUMENT_CHARS);
    assert!(kept.chars().all(|c| c == 'é'));
}

#[test]
fn serialized_arguments_are_truncated() {
    let args = json!({ "code": "x".repeat(2000), "context": "" });
    let serialized = args.to_string();
    let logged = loggable_arguments(Some(&args));

    let expected: String = serialized.chars().take(MAX_LOGGED_ARGUMENT_CHARS).collect();
    assert_eq!(logged, format!("{expected}{TRUNCATION_MARKER}"));
}

#[test]
fn small_and_absent_arguments_are_logged_in_full() {
    let args = json!({ "code": "fn main() {}", "context": "cli" });
    assert_eq!(loggable_arguments(Some(&args)), args.to_string());
    assert_eq!(loggable_arguments(None), "{}");
    assert_eq!(loggable_arguments(Some(&serde_json::Value::Null)), "{}");
}
