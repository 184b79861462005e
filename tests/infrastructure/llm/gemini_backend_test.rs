use std::sync::Arc;
use std::time::Duration;

use ledgerlens::application::ports::{
    AbortSignal, ExtractionError, FinishReason, GenerationBackend, ProviderFailure,
    TransactionExtractor,
};
use ledgerlens::infrastructure::llm::{
    GeminiBackend, GeminiConfig, GeminiExtractor, MockGenerationBackend,
};

use crate::helpers::fixtures::fast_retry_policy;
use crate::helpers::mock_server::{MockServer, closed_port_url, stalled_body_url};

const OK_BODY: &str = r#"{
    "candidates": [{
        "content": {"role": "model", "parts": [
            {"text": "{\"totalAmount\": {\"expenses\": 45000}, "},
            {"text": "\"currencyCode\": \"VND\"}"}
        ]},
        "finishReason": "STOP"
    }],
    "usageMetadata": {"promptTokenCount": 100, "candidatesTokenCount": 23, "totalTokenCount": 123}
}"#;

fn config(base_url: &str) -> GeminiConfig {
    GeminiConfig {
        api_key: "test-key".to_string(),
        model: "gemini-test".to_string(),
        base_url: base_url.to_string(),
        temperature: 0.1,
        max_output_tokens: 1024,
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn given_successful_reply_when_generating_then_concatenates_parts_and_counts_tokens() {
    let server = MockServer::start(200, OK_BODY).await;
    let backend = GeminiBackend::new(config(&server.base_url));

    let response = backend.generate("Coffee 45000").await.unwrap();

    assert_eq!(response.candidates.len(), 1);
    assert_eq!(
        response.candidates[0].text,
        "{\"totalAmount\": {\"expenses\": 45000}, \"currencyCode\": \"VND\"}"
    );
    assert_eq!(response.candidates[0].finish_reason, FinishReason::Stop);
    assert_eq!(response.usage.total_tokens, 123);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.path, "/v1beta/models/gemini-test:generateContent");
    assert_eq!(request.headers.get("x-goog-api-key").unwrap(), "test-key");
    assert_eq!(
        request.body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(request.body["generationConfig"]["maxOutputTokens"], 1024);
    assert_eq!(
        request.body["contents"][0]["parts"][0]["text"],
        "Coffee 45000"
    );
}

#[tokio::test]
async fn given_rate_limit_status_when_generating_then_returns_rate_limited() {
    let server = MockServer::start(429, r#"{"error": {"status": "RESOURCE_EXHAUSTED"}}"#).await;
    let backend = GeminiBackend::new(config(&server.base_url));

    let result = backend.generate("prompt").await;

    assert!(matches!(result, Err(ProviderFailure::RateLimited(msg)) if msg.contains("429")));
}

#[tokio::test]
async fn given_unavailable_status_when_generating_then_returns_service_unavailable() {
    let server = MockServer::start(503, "{}").await;
    let backend = GeminiBackend::new(config(&server.base_url));

    let result = backend.generate("prompt").await;

    assert!(matches!(result, Err(ProviderFailure::ServiceUnavailable(_))));
}

#[tokio::test]
async fn given_auth_error_status_when_generating_then_returns_fatal() {
    let server = MockServer::start(403, r#"{"error": {"status": "PERMISSION_DENIED"}}"#).await;
    let backend = GeminiBackend::new(config(&server.base_url));

    let result = backend.generate("prompt").await;

    assert!(matches!(result, Err(ProviderFailure::Fatal(_))));
}

#[tokio::test]
async fn given_blocked_prompt_when_generating_then_returns_fatal() {
    let server = MockServer::start(
        200,
        r#"{"promptFeedback": {"blockReason": "SAFETY"}, "usageMetadata": {"totalTokenCount": 7}}"#,
    )
    .await;
    let backend = GeminiBackend::new(config(&server.base_url));

    let result = backend.generate("prompt").await;

    assert!(matches!(result, Err(ProviderFailure::Fatal(msg)) if msg.contains("SAFETY")));
}

#[tokio::test]
async fn given_max_tokens_finish_when_generating_then_reports_length_cutoff() {
    let server = MockServer::start(
        200,
        r#"{"candidates": [{"content": {"parts": [{"text": "{\"a\":"}]},
            "finishReason": "MAX_TOKENS"}]}"#,
    )
    .await;
    let backend = GeminiBackend::new(config(&server.base_url));

    let response = backend.generate("prompt").await.unwrap();

    assert_eq!(response.candidates[0].finish_reason, FinishReason::MaxTokens);
    assert_eq!(response.usage.total_tokens, 0);
}

#[tokio::test]
async fn given_nothing_listening_when_generating_then_returns_service_unavailable() {
    let backend = GeminiBackend::new(config(&closed_port_url().await));

    let result = backend.generate("prompt").await;

    assert!(matches!(result, Err(ProviderFailure::ServiceUnavailable(_))));
}

#[tokio::test]
async fn given_body_timeout_when_generating_then_deadline_exceeded() {
    let mut config = config(&stalled_body_url().await);
    config.timeout = Duration::from_millis(300);
    let backend = GeminiBackend::new(config);

    let result = backend.generate("prompt").await;

    assert!(matches!(&result, Err(ProviderFailure::DeadlineExceeded(_))), "{result:?}");
    assert!(result.unwrap_err().is_retryable());
}

#[tokio::test]
async fn given_successful_reply_when_extracting_then_returns_coerced_transaction() {
    let server = MockServer::start(200, OK_BODY).await;
    let extractor = GeminiExtractor::new(config(&server.base_url), fast_retry_policy());

    let extracted = extractor
        .extract_validated("Coffee 45000", "Extract.", &AbortSignal::never())
        .await
        .unwrap();

    assert_eq!(extractor.provider(), "gemini");
    assert_eq!(extracted.result.total_amount.expenses, 45000.0);
    assert_eq!(extracted.result.tokens_used, 123);
    let prompt = server.requests()[0].body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.starts_with("Extract."));
    assert!(prompt.ends_with("Coffee 45000"));
}

#[tokio::test]
async fn given_fatal_status_when_extracting_then_absorbs_into_safe_default_after_one_call() {
    let server = MockServer::start(400, r#"{"error": {"status": "INVALID_ARGUMENT"}}"#).await;
    let backend = Arc::new(GeminiBackend::new(config(&server.base_url)));
    let extractor = GeminiExtractor::with_backend(backend, fast_retry_policy());

    let raw = extractor
        .extract_raw("Coffee 45000", "Extract.", &AbortSignal::never())
        .await
        .unwrap();

    assert_eq!(raw.error_kind(), Some("call"));
    assert!(raw.error().unwrap().contains("400"));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn given_transient_status_when_extracting_then_retries_before_giving_up() {
    let server = MockServer::start(502, "bad gateway").await;
    let extractor = GeminiExtractor::new(config(&server.base_url), fast_retry_policy());

    let raw = extractor
        .extract_raw("Coffee 45000", "Extract.", &AbortSignal::never())
        .await
        .unwrap();

    assert_eq!(raw.error_kind(), Some("call"));
    assert_eq!(server.requests().len(), 3);
}

#[tokio::test]
async fn given_blank_text_when_extracting_then_returns_empty_input_without_calling_provider() {
    let backend = Arc::new(MockGenerationBackend::answering("{}", 1));
    let extractor = GeminiExtractor::with_backend(backend.clone(), fast_retry_policy());

    let result = extractor
        .extract_raw("  \n\t", "Extract.", &AbortSignal::never())
        .await;

    assert!(matches!(result, Err(ExtractionError::EmptyInput)));
    assert_eq!(backend.attempts(), 0);
}
