use std::sync::Arc;

use async_trait::async_trait;

use super::gemini_backend::{GeminiBackend, GeminiConfig};
use super::transcript_extraction::extract_with_client;
use crate::application::ports::{
    AbortSignal, ExtractionError, GenerationBackend, TransactionExtractor,
};
use crate::application::services::{GenerationClient, RetryPolicy};
use crate::domain::RawExtraction;

pub struct GeminiExtractor {
    client: GenerationClient,
}

impl GeminiExtractor {
    pub fn new(config: GeminiConfig, policy: RetryPolicy) -> Self {
        Self::with_backend(Arc::new(GeminiBackend::new(config)), policy)
    }

    pub fn with_backend(backend: Arc<dyn GenerationBackend>, policy: RetryPolicy) -> Self {
        Self {
            client: GenerationClient::new(backend, policy),
        }
    }
}

#[async_trait]
impl TransactionExtractor for GeminiExtractor {
    fn provider(&self) -> &'static str {
        "gemini"
    }

    #[tracing::instrument(skip_all, fields(provider = "gemini", chars = text.len()))]
    async fn extract_raw(
        &self,
        text: &str,
        template: &str,
        abort: &AbortSignal,
    ) -> Result<RawExtraction, ExtractionError> {
        extract_with_client(&self.client, text, template, abort).await
    }
}
