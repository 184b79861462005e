use std::path::Path;

use async_trait::async_trait;

use super::text_sanitizer::sanitize_ocr_text;
use super::vision_chat_client::{VisionChatClient, encode_png};
use crate::application::ports::{Recognition, RecognitionAdapter, RecognitionError};
use crate::domain::RecognizedText;

pub const OCR_PROMPT: &str = "You are an OCR engine for receipts and bills. Transcribe every \
line of text in this image exactly as printed, top to bottom, one line per output line. Keep \
prices, quantities and totals next to their item names. Output only the transcribed text.";

const MAX_OCR_EDGE: u32 = 2048;
const OCR_MAX_TOKENS: u32 = 2048;

/// Receipt OCR through a vision-language model.
pub struct VlmOcrRecognizer {
    client: VisionChatClient,
}

impl VlmOcrRecognizer {
    pub fn new(client: VisionChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecognitionAdapter for VlmOcrRecognizer {
    #[tracing::instrument(skip(self), fields(model = %self.client.model()))]
    async fn transcribe(&self, media_path: &Path) -> Result<Recognition, RecognitionError> {
        let bytes = tokio::fs::read(media_path).await?;

        let png = tokio::task::spawn_blocking(move || {
            let image = image::load_from_memory(&bytes)
                .map_err(|e| RecognitionError::UnsupportedFormat(e.to_string()))?;
            let image = if image.width() > MAX_OCR_EDGE || image.height() > MAX_OCR_EDGE {
                image.thumbnail(MAX_OCR_EDGE, MAX_OCR_EDGE)
            } else {
                image
            };
            encode_png(&image).map_err(|e| RecognitionError::DecodingFailed(e.to_string()))
        })
        .await
        .map_err(|e| RecognitionError::DecodingFailed(format!("image task: {e}")))??;

        let raw = self
            .client
            .ask(&png, OCR_PROMPT, OCR_MAX_TOKENS)
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(e.to_string()))?;

        let text = sanitize_ocr_text(&raw);
        tracing::info!(lines = text.lines().count(), "Receipt OCR completed");
        Ok(Recognition {
            text: RecognizedText::Plain(text),
            model_name: self.client.model().to_string(),
        })
    }
}
