use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::AbortSignal;
use crate::domain::{RawExtraction, SchemaValidationError, ValidatedResult, coerce};

#[async_trait]
pub trait TransactionExtractor: Send + Sync {
    fn provider(&self) -> &'static str;

    /// Never fails on provider trouble: call and decode failures come back as
    /// the safe-default shape carrying `error`/`errorKind`.
    async fn extract_raw(
        &self,
        text: &str,
        template: &str,
        abort: &AbortSignal,
    ) -> Result<RawExtraction, ExtractionError>;

    async fn extract_validated(
        &self,
        text: &str,
        template: &str,
        abort: &AbortSignal,
    ) -> Result<ExtractedTransaction, ExtractionError> {
        let started = Instant::now();
        let raw = self.extract_raw(text, template, abort).await?;
        let result = coerce(&raw).map_err(ExtractionError::Schema)?;
        Ok(ExtractedTransaction {
            raw,
            result,
            processing_time: started.elapsed(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ExtractedTransaction {
    pub raw: RawExtraction,
    pub result: ValidatedResult,
    pub processing_time: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("recognized text is empty")]
    EmptyInput,
    #[error("schema validation failed: {0}")]
    Schema(#[from] SchemaValidationError),
}
