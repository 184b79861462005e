use std::path::Path;

use async_trait::async_trait;

use crate::domain::RecognizedText;

/// Turns a media file on disk into text (OCR or transcription).
#[async_trait]
pub trait RecognitionAdapter: Send + Sync {
    async fn transcribe(&self, media_path: &Path) -> Result<Recognition, RecognitionError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub text: RecognizedText,
    pub model_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("unsupported media format: {0}")]
    UnsupportedFormat(String),
    #[error("media decoding failed: {0}")]
    DecodingFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("recognition failed: {0}")]
    RecognitionFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
