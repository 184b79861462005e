use async_trait::async_trait;

/// One raw attempt against a structured-generation provider. Retries,
/// backoff and response validation live in `GenerationClient`.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> Result<GenerationResponse, ProviderFailure>;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationResponse {
    pub candidates: Vec<Candidate>,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub text: String,
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub total_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Blocklist,
    ProhibitedContent,
    Spii,
    Refusal,
    Other,
    Unrecognized(String),
}

impl FinishReason {
    /// The provider refused or filtered the answer.
    pub fn is_policy_rejection(&self) -> bool {
        matches!(
            self,
            FinishReason::Safety
                | FinishReason::Recitation
                | FinishReason::Blocklist
                | FinishReason::ProhibitedContent
                | FinishReason::Spii
                | FinishReason::Refusal
                | FinishReason::Other
        )
    }

    pub fn is_length_cutoff(&self) -> bool {
        matches!(self, FinishReason::MaxTokens)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FinishReason::Stop => "STOP",
            FinishReason::MaxTokens => "MAX_TOKENS",
            FinishReason::Safety => "SAFETY",
            FinishReason::Recitation => "RECITATION",
            FinishReason::Blocklist => "BLOCKLIST",
            FinishReason::ProhibitedContent => "PROHIBITED_CONTENT",
            FinishReason::Spii => "SPII",
            FinishReason::Refusal => "REFUSAL",
            FinishReason::Other => "OTHER",
            FinishReason::Unrecognized(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderFailure {
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("deadline exceeded: {0}")]
    DeadlineExceeded(String),
    #[error("provider call failed: {0}")]
    Fatal(String),
    #[error("aborted after {attempts} attempt(s)")]
    Aborted { attempts: u32 },
}

impl ProviderFailure {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderFailure::RateLimited(_)
                | ProviderFailure::ServiceUnavailable(_)
                | ProviderFailure::DeadlineExceeded(_)
        )
    }
}

/// Validated text of the first candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    pub text: String,
    pub tokens_used: u64,
    pub truncated: bool,
}

pub type ProviderCallOutcome = Result<GenerationOutput, ProviderFailure>;
