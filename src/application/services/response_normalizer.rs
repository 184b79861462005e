use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::application::ports::ProviderCallOutcome;
use crate::domain::{ExtractionErrorKind, RawExtraction};

static FENCED_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").unwrap());

/// Returns the JSON object inside a ```json (or bare ```) fence, or the
/// trimmed input when there is no fenced object.
pub fn strip_code_fence(text: &str) -> &str {
    match FENCED_OBJECT.captures(text).and_then(|c| c.get(1)) {
        Some(object) => object.as_str(),
        None => text.trim(),
    }
}

/// Folds a provider call outcome into a `RawExtraction`. Call and decode
/// failures become the safe-default shape annotated with the error.
pub fn normalize_outcome(outcome: ProviderCallOutcome) -> RawExtraction {
    let output = match outcome {
        Ok(output) => output,
        Err(failure) => {
            warn!(error = %failure, "Provider call failed, returning safe defaults");
            return RawExtraction::failed(ExtractionErrorKind::Call, failure.to_string());
        }
    };

    let candidate = strip_code_fence(&output.text);
    let mut raw = match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => {
            let mut raw = RawExtraction::from_map(map);
            raw.fill_missing_defaults();
            raw
        }
        Ok(other) => {
            warn!(
                response_chars = output.text.len(),
                "Provider response is JSON but not an object"
            );
            RawExtraction::failed(
                ExtractionErrorKind::Decode,
                format!("expected a JSON object, got {}", json_kind(&other)),
            )
            .with_raw_response(output.text.clone())
        }
        Err(e) => {
            warn!(
                error = %e,
                response_chars = output.text.len(),
                "Provider response is not valid JSON"
            );
            RawExtraction::failed(ExtractionErrorKind::Decode, e.to_string())
                .with_raw_response(output.text.clone())
        }
    };

    raw.set_tokens_used(output.tokens_used);
    if output.truncated {
        raw.mark_truncated();
    }
    raw
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
