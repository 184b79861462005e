use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::application::ports::{
    AbortSignal, GenerationBackend, GenerationOutput, GenerationResponse, ProviderCallOutcome,
    ProviderFailure,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter_ratio: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            jitter_ratio: 0.1,
        }
    }
}

impl RetryPolicy {
    /// `min(base * 2^attempt, max)` before jitter.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    pub fn jittered_delay(&self, attempt: u32) -> Duration {
        let delay = self.backoff_delay(attempt);
        let max_jitter = delay.as_secs_f64() * self.jitter_ratio;
        if max_jitter <= 0.0 {
            return delay;
        }
        let jitter = rand::thread_rng().gen_range(0.0..=max_jitter);
        delay + Duration::from_secs_f64(jitter)
    }
}

/// Wraps one backend with retry, backoff and response validation.
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
    policy: RetryPolicy,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn GenerationBackend>, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn provider_name(&self) -> &'static str {
        self.backend.provider_name()
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    #[instrument(skip(self, prompt, abort), fields(provider = self.backend.provider_name()))]
    pub async fn invoke(&self, prompt: &str, abort: &AbortSignal) -> ProviderCallOutcome {
        let mut attempt: u32 = 0;
        loop {
            let failure = match self.backend.generate(prompt).await {
                Ok(response) => return validate_response(response),
                Err(failure) => failure,
            };

            if !failure.is_retryable() {
                warn!(error = %failure, attempt, "Generation failed with a non-retryable error");
                return Err(failure);
            }
            if attempt >= self.policy.max_retries {
                warn!(
                    error = %failure,
                    attempts = attempt + 1,
                    "Generation retries exhausted"
                );
                return Err(failure);
            }

            let delay = self.policy.jittered_delay(attempt);
            warn!(
                error = %failure,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "Retryable generation failure, backing off"
            );

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = abort.aborted() => {
                    debug!(attempt, "Abort observed during backoff");
                    return Err(ProviderFailure::Aborted { attempts: attempt + 1 });
                }
            }
            attempt += 1;
        }
    }
}

/// Accepts the first candidate unless it was filtered, empty, or missing.
pub fn validate_response(response: GenerationResponse) -> ProviderCallOutcome {
    let tokens_used = response.usage.total_tokens;
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ProviderFailure::Fatal(
            "response contained no candidates".to_string(),
        ));
    };

    if candidate.finish_reason.is_policy_rejection() {
        return Err(ProviderFailure::Fatal(format!(
            "response blocked with finish reason {}",
            candidate.finish_reason.as_str()
        )));
    }

    if candidate.text.trim().is_empty() {
        return Err(ProviderFailure::Fatal(
            "response candidate has no text".to_string(),
        ));
    }

    let truncated = candidate.finish_reason.is_length_cutoff();
    if truncated {
        warn!(tokens_used, "Response truncated at the provider length limit");
    }

    Ok(GenerationOutput {
        text: candidate.text,
        tokens_used,
        truncated,
    })
}
