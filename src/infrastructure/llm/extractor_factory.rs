use std::sync::Arc;
use std::time::Duration;

use super::bedrock_backend::BedrockConfig;
use super::bedrock_extractor::BedrockExtractor;
use super::gemini_backend::GeminiConfig;
use super::gemini_extractor::GeminiExtractor;
use crate::application::ports::TransactionExtractor;
use crate::application::services::RetryPolicy;
use crate::presentation::config::{
    BedrockSettings, ExtractionProvider, GeminiSettings, RetrySettings,
};

pub struct ExtractorFactory;

#[derive(Debug, thiserror::Error)]
pub enum ExtractorFactoryError {
    #[error("missing API key for the {0} extraction provider")]
    MissingApiKey(&'static str),
}

impl ExtractorFactory {
    pub fn create(
        provider: ExtractionProvider,
        gemini: &GeminiSettings,
        bedrock: &BedrockSettings,
        retry: &RetrySettings,
    ) -> Result<Arc<dyn TransactionExtractor>, ExtractorFactoryError> {
        let policy = retry_policy(retry);
        match provider {
            ExtractionProvider::Gemini => {
                if gemini.api_key.is_empty() {
                    return Err(ExtractorFactoryError::MissingApiKey("gemini"));
                }
                tracing::info!(model = %gemini.model, "Using Gemini extraction provider");
                Ok(Arc::new(GeminiExtractor::new(
                    GeminiConfig {
                        api_key: gemini.api_key.clone(),
                        model: gemini.model.clone(),
                        base_url: gemini.base_url.clone(),
                        temperature: gemini.temperature,
                        max_output_tokens: gemini.max_output_tokens,
                        timeout: Duration::from_secs(gemini.timeout_secs),
                    },
                    policy,
                )))
            }
            ExtractionProvider::Bedrock => {
                if bedrock.api_key.is_empty() {
                    return Err(ExtractorFactoryError::MissingApiKey("bedrock"));
                }
                tracing::info!(
                    model_id = %bedrock.model_id,
                    region = %bedrock.region,
                    "Using Bedrock extraction provider"
                );
                Ok(Arc::new(BedrockExtractor::new(
                    BedrockConfig {
                        api_key: bedrock.api_key.clone(),
                        region: bedrock.region.clone(),
                        model_id: bedrock.model_id.clone(),
                        endpoint: bedrock.endpoint.clone(),
                        max_tokens: bedrock.max_tokens,
                        temperature: bedrock.temperature,
                        timeout: Duration::from_secs(bedrock.timeout_secs),
                    },
                    policy,
                )))
            }
        }
    }
}

pub fn retry_policy(retry: &RetrySettings) -> RetryPolicy {
    RetryPolicy {
        max_retries: retry.max_retries,
        base_delay: Duration::from_millis(retry.base_delay_ms),
        max_delay: Duration::from_millis(retry.max_delay_ms),
        jitter_ratio: retry.jitter_ratio,
    }
}
