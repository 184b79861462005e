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

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

#[derive(Debug, Clone)]
pub struct BedrockConfig {
    pub api_key: String,
    pub region: String,
    pub model_id: String,
    /// Overrides `https://bedrock-runtime.{region}.amazonaws.com`.
    pub endpoint: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

/// Anthropic Claude hosted on AWS Bedrock, `InvokeModel` with a Bedrock API key.
pub struct BedrockBackend {
    client: Client,
    config: BedrockConfig,
}

impl BedrockBackend {
    pub fn new(config: BedrockConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        let base = match &self.config.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.config.region),
        };
        format!("{}/model/{}/invoke", base, self.config.model_id)
    }
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<RequestBlock<'a>>,
}

#[derive(Serialize)]
struct RequestBlock<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

fn parse_stop_reason(raw: Option<&str>) -> FinishReason {
    match raw {
        None | Some("end_turn") | Some("stop_sequence") => FinishReason::Stop,
        Some("max_tokens") => FinishReason::MaxTokens,
        Some("refusal") => FinishReason::Refusal,
        Some(other) => FinishReason::Unrecognized(other.to_string()),
    }
}

#[async_trait]
impl GenerationBackend for BedrockBackend {
    fn provider_name(&self) -> &'static str {
        "bedrock"
    }

    #[instrument(skip(self, prompt), fields(model_id = %self.config.model_id))]
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse, ProviderFailure> {
        debug!(prompt = %sanitize_prompt(prompt), "Calling Bedrock");
        let body = InvokeRequest {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![Message {
                role: "user",
                content: vec![RequestBlock {
                    kind: "text",
                    text: prompt,
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json")
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
        let parsed: InvokeResponse = serde_json::from_slice(&raw)
            .map_err(|e| ProviderFailure::Fatal(format!("invalid Bedrock response: {e}")))?;

        let text = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<String>();

        // Claude answers with a single message, surfaced as one candidate.
        let candidates = if text.is_empty() && parsed.stop_reason.is_none() {
            Vec::new()
        } else {
            vec![Candidate {
                text,
                finish_reason: parse_stop_reason(parsed.stop_reason.as_deref()),
            }]
        };

        Ok(GenerationResponse {
            candidates,
            usage: TokenUsage {
                total_tokens: parsed.usage.input_tokens + parsed.usage.output_tokens,
            },
        })
    }
}
