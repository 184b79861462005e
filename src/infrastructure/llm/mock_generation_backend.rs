use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::application::ports::{
    Candidate, FinishReason, GenerationBackend, GenerationResponse, ProviderFailure, TokenUsage,
};

type ScriptedReply = Result<GenerationResponse, ProviderFailure>;

/// Replays scripted replies in order; the last reply repeats once the script
/// runs out.
pub struct MockGenerationBackend {
    replies: Mutex<VecDeque<ScriptedReply>>,
    fallback: ScriptedReply,
    attempts: AtomicU32,
}

impl MockGenerationBackend {
    pub fn scripted(replies: Vec<ScriptedReply>) -> Self {
        let fallback = replies
            .last()
            .cloned()
            .unwrap_or_else(|| Err(ProviderFailure::Fatal("empty script".to_string())));
        Self {
            replies: Mutex::new(replies.into()),
            fallback,
            attempts: AtomicU32::new(0),
        }
    }

    pub fn always(reply: ScriptedReply) -> Self {
        Self::scripted(vec![reply])
    }

    pub fn answering(text: &str, total_tokens: u64) -> Self {
        Self::always(Ok(Self::response(text, FinishReason::Stop, total_tokens)))
    }

    pub fn response(
        text: &str,
        finish_reason: FinishReason,
        total_tokens: u64,
    ) -> GenerationResponse {
        GenerationResponse {
            candidates: vec![Candidate {
                text: text.to_string(),
                finish_reason,
            }],
            usage: TokenUsage { total_tokens },
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, _prompt: &str) -> Result<GenerationResponse, ProviderFailure> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let next = match self.replies.lock() {
            Ok(mut replies) => replies.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        next.unwrap_or_else(|| self.fallback.clone())
    }
}
