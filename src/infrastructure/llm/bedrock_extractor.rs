use std::sync::Arc;

use async_trait::async_trait;

use super::bedrock_backend::{BedrockBackend, BedrockConfig};
use super::transcript_extraction::extract_with_client;
use crate::application::ports::{
    AbortSignal, ExtractionError, GenerationBackend, TransactionExtractor,
};
use crate::application::services::{GenerationClient, RetryPolicy};
use crate::domain::RawExtraction;

pub struct BedrockExtractor {
    client: GenerationClient,
}

impl BedrockExtractor {
    pub fn new(config: BedrockConfig, policy: RetryPolicy) -> Self {
        Self::with_backend(Arc::new(BedrockBackend::new(config)), policy)
    }

    pub fn with_backend(backend: Arc<dyn GenerationBackend>, policy: RetryPolicy) -> Self {
        Self {
            client: GenerationClient::new(backend, policy),
        }
    }
}

#[async_trait]
impl TransactionExtractor for BedrockExtractor {
    fn provider(&self) -> &'static str {
        "bedrock"
    }

    #[tracing::instrument(skip_all, fields(provider = "bedrock", chars = text.len()))]
    async fn extract_raw(
        &self,
        text: &str,
        template: &str,
        abort: &AbortSignal,
    ) -> Result<RawExtraction, ExtractionError> {
        extract_with_client(&self.client, text, template, abort).await
    }
}
