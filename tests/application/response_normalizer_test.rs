use ledgerlens::application::ports::{GenerationOutput, ProviderFailure};
use ledgerlens::application::services::{normalize_outcome, strip_code_fence};
use serde_json::json;

fn output(text: &str) -> GenerationOutput {
    GenerationOutput {
        text: text.to_string(),
        tokens_used: 55,
        truncated: false,
    }
}

#[test]
fn given_json_fence_when_stripping_then_returns_inner_object() {
    let text = "Here you go:\n```json\n{\"currencyCode\": \"USD\"}\n```\nThanks";

    assert_eq!(strip_code_fence(text), "{\"currencyCode\": \"USD\"}");
}

#[test]
fn given_bare_fence_when_stripping_then_returns_inner_object() {
    assert_eq!(strip_code_fence("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
}

#[test]
fn given_unfenced_text_when_stripping_then_returns_trimmed_input() {
    assert_eq!(strip_code_fence("  {\"a\": 1}\n"), "{\"a\": 1}");
}

#[test]
fn given_call_failure_when_normalizing_then_returns_safe_default_with_error() {
    let raw = normalize_outcome(Err(ProviderFailure::ServiceUnavailable(
        "HTTP 503".to_string(),
    )));

    assert_eq!(raw.error_kind(), Some("call"));
    assert!(raw.error().unwrap().contains("HTTP 503"));
    assert_eq!(
        raw.get("totalAmount"),
        Some(&json!({"incomes": 0, "expenses": 0}))
    );
    assert_eq!(raw.get("currencyCode"), Some(&json!("VND")));
}

#[test]
fn given_invalid_json_when_normalizing_then_keeps_raw_response() {
    let raw = normalize_outcome(Ok(output("I could not find any transactions.")));

    assert_eq!(raw.error_kind(), Some("decode"));
    assert_eq!(raw.raw_response(), Some("I could not find any transactions."));
    assert_eq!(raw.get("tokensUsed"), Some(&json!(55)));
}

#[test]
fn given_json_array_when_normalizing_then_reports_decode_error() {
    let raw = normalize_outcome(Ok(output("[1, 2, 3]")));

    assert_eq!(raw.error_kind(), Some("decode"));
    assert!(raw.error().unwrap().contains("an array"));
}

#[test]
fn given_partial_object_when_normalizing_then_fills_missing_defaults() {
    let raw = normalize_outcome(Ok(output(
        "{\"lineItems\": {\"expenses\": [{\"description\": \"Tea\", \"amount\": 3}]}}",
    )));

    assert!(raw.error().is_none());
    assert_eq!(raw.get("currencyCode"), Some(&json!("VND")));
    assert_eq!(
        raw.get("totalAmount"),
        Some(&json!({"incomes": 0, "expenses": 0}))
    );
    assert!(!raw.is_truncated());
}

#[test]
fn given_truncated_output_when_normalizing_then_marks_truncated() {
    let raw = normalize_outcome(Ok(GenerationOutput {
        text: "{\"currencyCode\": \"EUR\"}".to_string(),
        tokens_used: 8192,
        truncated: true,
    }));

    assert!(raw.is_truncated());
    assert_eq!(raw.get("tokensUsed"), Some(&json!(8192)));
}
