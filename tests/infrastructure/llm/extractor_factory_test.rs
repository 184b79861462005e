use std::time::Duration;

use ledgerlens::infrastructure::llm::{ExtractorFactory, ExtractorFactoryError, retry_policy};
use ledgerlens::presentation::config::{
    BedrockSettings, ExtractionProvider, GeminiSettings, RetrySettings,
};

fn gemini(api_key: &str) -> GeminiSettings {
    GeminiSettings {
        api_key: api_key.to_string(),
        model: "gemini-2.0-flash".to_string(),
        base_url: "http://localhost:9".to_string(),
        temperature: 0.1,
        max_output_tokens: 1024,
        timeout_secs: 5,
    }
}

fn bedrock(api_key: &str) -> BedrockSettings {
    BedrockSettings {
        api_key: api_key.to_string(),
        region: "us-east-1".to_string(),
        model_id: "anthropic.claude-test".to_string(),
        endpoint: None,
        max_tokens: 1024,
        temperature: 0.1,
        timeout_secs: 5,
    }
}

fn retry() -> RetrySettings {
    RetrySettings {
        max_retries: 3,
        base_delay_ms: 250,
        max_delay_ms: 4000,
        jitter_ratio: 0.05,
    }
}

#[test]
fn given_provider_choice_when_creating_extractor_then_returns_matching_backend() {
    let gemini_extractor = ExtractorFactory::create(
        ExtractionProvider::Gemini,
        &gemini("g-key"),
        &bedrock(""),
        &retry(),
    )
    .unwrap();
    let bedrock_extractor = ExtractorFactory::create(
        ExtractionProvider::Bedrock,
        &gemini(""),
        &bedrock("b-key"),
        &retry(),
    )
    .unwrap();

    assert_eq!(gemini_extractor.provider(), "gemini");
    assert_eq!(bedrock_extractor.provider(), "bedrock");
}

#[test]
fn given_missing_api_key_when_creating_extractor_then_fails() {
    let result = ExtractorFactory::create(
        ExtractionProvider::Bedrock,
        &gemini("g-key"),
        &bedrock(""),
        &retry(),
    );

    assert!(matches!(
        result,
        Err(ExtractorFactoryError::MissingApiKey("bedrock"))
    ));
}

#[test]
fn given_retry_settings_when_building_policy_then_converts_units() {
    let policy = retry_policy(&retry());

    assert_eq!(policy.max_retries, 3);
    assert_eq!(policy.base_delay, Duration::from_millis(250));
    assert_eq!(policy.max_delay, Duration::from_secs(4));
    assert_eq!(policy.jitter_ratio, 0.05);
}
