use std::sync::Arc;
use std::time::Duration;

use super::candle_whisper_recognizer::CandleWhisperRecognizer;
use super::lazy_recognizer::LazyRecognizer;
use super::openai_whisper_recognizer::OpenAiWhisperRecognizer;
use super::vision_chat_client::VisionChatClient;
use super::vlm_ocr_recognizer::VlmOcrRecognizer;
use super::vlm_receipt_classifier::VlmReceiptClassifier;
use crate::application::ports::{ImageClassifier, RecognitionAdapter, RecognitionError};
use crate::presentation::config::{TranscriptionProvider, TranscriptionSettings, VisionSettings};

pub struct RecognizerFactory;

impl RecognizerFactory {
    pub fn speech(
        settings: &TranscriptionSettings,
    ) -> Result<Arc<dyn RecognitionAdapter>, RecognitionError> {
        match settings.provider {
            TranscriptionProvider::Local => {
                let model = settings.model.clone();
                let language = settings.language.clone().filter(|l| !l.is_empty());
                tracing::info!(model = %model, "Local Whisper will load on first request");
                Ok(Arc::new(LazyRecognizer::new(
                    format!("candle-whisper:{model}"),
                    move || {
                        let recognizer = CandleWhisperRecognizer::new(&model, language.as_deref())?;
                        Ok(Arc::new(recognizer) as Arc<dyn RecognitionAdapter>)
                    },
                )))
            }
            TranscriptionProvider::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| {
                        RecognitionError::ModelLoadFailed(
                            "API key required for OpenAI Whisper".to_string(),
                        )
                    })?;
                tracing::info!(model = %settings.model, "Using OpenAI Whisper transcription");
                Ok(Arc::new(OpenAiWhisperRecognizer::new(
                    key,
                    settings.base_url.clone(),
                    Some(settings.model.clone()),
                    settings.language.clone().filter(|l| !l.is_empty()),
                )))
            }
        }
    }

    pub fn document(settings: &VisionSettings) -> Arc<dyn RecognitionAdapter> {
        Arc::new(VlmOcrRecognizer::new(Self::vision_client(
            settings,
            &settings.ocr_model,
        )))
    }

    pub fn classifier(settings: &VisionSettings) -> Arc<dyn ImageClassifier> {
        Arc::new(VlmReceiptClassifier::new(Self::vision_client(
            settings,
            &settings.classifier_model,
        )))
    }

    fn vision_client(settings: &VisionSettings, model: &str) -> VisionChatClient {
        VisionChatClient::new(
            &settings.base_url,
            model,
            &settings.api_key,
            Duration::from_secs(settings.timeout_secs),
        )
    }
}
