use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::http_status::{classify_body, classify_status, classify_transport};
use crate::application::ports::{
    Candidate, FinishReason, GenerationBackend, GenerationResponse, ProviderFailure, TokenUsage,
};
use crate::infrastructure::observability::sanitize_prompt;

pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

/// Google Generative Language `generateContent` over REST.
pub struct GeminiBackend {
    client: Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            config: GeminiConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseCandidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    total_token_count: u64,
}

fn parse_finish_reason(raw: Option<&str>) -> FinishReason {
    match raw {
        None | Some("STOP") | Some("FINISH_REASON_UNSPECIFIED") => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::MaxTokens,
        Some("SAFETY") | Some("IMAGE_SAFETY") => FinishReason::Safety,
        Some("RECITATION") => FinishReason::Recitation,
        Some("BLOCKLIST") => FinishReason::Blocklist,
        Some("PROHIBITED_CONTENT") => FinishReason::ProhibitedContent,
        Some("SPII") => FinishReason::Spii,
        Some("OTHER") => FinishReason::Other,
        Some(other) => FinishReason::Unrecognized(other.to_string()),
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse, ProviderFailure> {
        debug!(prompt = %sanitize_prompt(prompt), "Calling Gemini");
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
                response_mime_type: "application/json",
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &text));
        }

        let raw = response.bytes().await.map_err(|e| classify_body(&e))?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&raw)
            .map_err(|e| ProviderFailure::Fatal(format!("invalid Gemini response: {e}")))?;

        if parsed.candidates.is_empty() {
            if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(ProviderFailure::Fatal(format!(
                    "prompt blocked by Gemini: {reason}"
                )));
            }
        }

        let candidates = parsed
            .candidates
            .into_iter()
            .map(|candidate| {
                let text = candidate
                    .content
                    .map(|content| {
                        content
                            .parts
                            .into_iter()
                            .filter_map(|part| part.text)
                            .collect::<String>()
                    })
                    .unwrap_or_default();
                Candidate {
                    text,
                    finish_reason: parse_finish_reason(candidate.finish_reason.as_deref()),
                }
            })
            .collect();

        Ok(GenerationResponse {
            candidates,
            usage: TokenUsage {
                total_tokens: parsed
                    .usage_metadata
                    .map(|u| u.total_token_count)
                    .unwrap_or(0),
            },
        })
    }
}
