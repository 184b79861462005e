use tracing::debug;

use crate::application::ports::{AbortSignal, ExtractionError};
use crate::application::services::{GenerationClient, normalize_outcome};
use crate::domain::RawExtraction;

/// Fallback when no template file is configured.
pub const DEFAULT_TEMPLATE: &str = "Extract every income and expense transaction from the \
transcript below. Answer with one JSON object with keys totalAmount {incomes, expenses}, \
lineItems {incomes: [], expenses: []} where each item has description, amount and quantity, \
and currencyCode (VND, USD or EUR). Amounts are non-negative numbers.";

pub fn build_prompt(template: &str, text: &str) -> String {
    let template = if template.trim().is_empty() {
        DEFAULT_TEMPLATE
    } else {
        template
    };
    format!("{template}\n\nTranscript:\n{text}")
}

/// The shared extraction flow: prompt, call with retries, strip fences,
/// decode and default-fill.
pub async fn extract_with_client(
    client: &GenerationClient,
    text: &str,
    template: &str,
    abort: &AbortSignal,
) -> Result<RawExtraction, ExtractionError> {
    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyInput);
    }

    let prompt = build_prompt(template, text);
    let outcome = client.invoke(&prompt, abort).await;
    let raw = normalize_outcome(outcome);
    debug!(
        provider = client.provider_name(),
        error_kind = raw.error_kind().unwrap_or("none"),
        truncated = raw.is_truncated(),
        "Raw extraction ready"
    );
    Ok(raw)
}
