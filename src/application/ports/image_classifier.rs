use async_trait::async_trait;
use image::DynamicImage;

#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn score(&self, image: &DynamicImage) -> Result<ClassScores, ClassifierError>;
}

/// Probabilities for the two classes, summing to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassScores {
    pub target: f32,
    pub not_target: f32,
}

impl ClassScores {
    pub fn from_target_probability(probability: f32) -> Self {
        let target = probability.clamp(0.0, 1.0);
        Self {
            target,
            not_target: 1.0 - target,
        }
    }

    /// Binary heads that emit a single logit for the negative class.
    pub fn from_not_target_logit(logit: f32) -> Self {
        let not_target = 1.0 / (1.0 + (-logit).exp());
        Self {
            target: 1.0 - not_target,
            not_target,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier request failed: {0}")]
    RequestFailed(String),
    #[error("invalid classifier response: {0}")]
    InvalidResponse(String),
    #[error("image encoding failed: {0}")]
    EncodingFailed(String),
}
