use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{Recognition, RecognitionAdapter, RecognitionError};
use crate::domain::RecognizedText;

pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible `/audio/transcriptions`.
pub struct OpenAiWhisperRecognizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    language: Option<String>,
}

impl OpenAiWhisperRecognizer {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        language: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| OPENAI_DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
            language,
        }
    }
}

fn audio_mime(extension: &str) -> &'static str {
    match extension {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "ogg" => "audio/ogg",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl RecognitionAdapter for OpenAiWhisperRecognizer {
    #[tracing::instrument(skip(self), fields(model = %self.model))]
    async fn transcribe(&self, media_path: &Path) -> Result<Recognition, RecognitionError> {
        let audio = tokio::fs::read(media_path).await?;
        let extension = media_path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("wav")
            .to_ascii_lowercase();

        let file_part = multipart::Part::bytes(audio)
            .file_name(format!("speech.{extension}"))
            .mime_str(audio_mime(&extension))
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("mime: {e}")))?;

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RecognitionError::ApiRequestFailed(format!(
                "status {status}: {body}"
            )));
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("body: {e}")))?;
        tracing::info!(chars = transcript.len(), "Speech transcription completed");

        Ok(Recognition {
            text: RecognizedText::Plain(transcript.trim().to_string()),
            model_name: self.model.clone(),
        })
    }
}
