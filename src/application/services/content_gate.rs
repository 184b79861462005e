use std::sync::Arc;

use image::imageops::FilterType;
use tracing::{debug, instrument};

use crate::application::ports::{ClassScores, ClassifierError, ImageClassifier};

pub const GATE_INPUT_SIZE: u32 = 224;
pub const DEFAULT_GATE_THRESHOLD: f32 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateDecision {
    pub is_target_class: bool,
    pub confidence: f32,
    pub scores: ClassScores,
}

/// Cheap receipt/not-receipt pre-filter in front of OCR.
pub struct ContentGate {
    classifier: Arc<dyn ImageClassifier>,
    threshold: f32,
}

impl ContentGate {
    pub fn new(classifier: Arc<dyn ImageClassifier>, threshold: f32) -> Self {
        Self {
            classifier,
            threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    #[instrument(skip(self, media), fields(media_bytes = media.len()))]
    pub async fn classify(&self, media: &[u8]) -> Result<GateDecision, ContentGateError> {
        let image = image::load_from_memory(media)
            .map_err(|e| ContentGateError::UnsupportedMedia(e.to_string()))?;
        let resized = image.resize_exact(GATE_INPUT_SIZE, GATE_INPUT_SIZE, FilterType::Triangle);

        let scores = self.classifier.score(&resized).await?;
        let decision = decide(scores, self.threshold);
        debug!(
            target_score = scores.target,
            not_target_score = scores.not_target,
            accepted = decision.is_target_class,
            "Content gate scored image"
        );
        Ok(decision)
    }
}

/// Accepts when the target probability clears the threshold, or simply beats
/// the other class. The second clause makes the threshold a fast path only.
pub fn decide(scores: ClassScores, threshold: f32) -> GateDecision {
    let is_target_class = scores.target >= threshold || scores.target > scores.not_target;
    GateDecision {
        is_target_class,
        confidence: scores.target,
        scores,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContentGateError {
    #[error("unsupported media: {0}")]
    UnsupportedMedia(String),
    #[error("classifier: {0}")]
    Classifier(#[from] ClassifierError),
}
