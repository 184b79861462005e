use std::io::Cursor;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use image::{DynamicImage, ImageFormat};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum VisionCallError {
    #[error("vision request failed: {0}")]
    Request(String),
    #[error("vision endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid vision response: {0}")]
    InvalidResponse(String),
}

/// Single-image prompts against an OpenAI-compatible chat-completions
/// endpoint (LM Studio, vLLM, OpenAI).
pub struct VisionChatClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl VisionChatClient {
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn ask(
        &self,
        png_bytes: &[u8],
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, VisionCallError> {
        let data_uri = format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(png_bytes)
        );
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        { "type": "image_url", "image_url": { "url": data_uri } },
                        { "type": "text", "text": prompt }
                    ]
                }
            ],
            "max_tokens": max_tokens,
            "temperature": 0.0,
            "stream": false
        });

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VisionCallError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(VisionCallError::Status { status, body });
        }

        let raw = response
            .bytes()
            .await
            .map_err(|e| VisionCallError::Request(e.to_string()))?;
        let completion: ChatCompletion = serde_json::from_slice(&raw).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&raw),
                "Failed to parse vision completion"
            );
            VisionCallError::InvalidResponse(e.to_string())
        })?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
