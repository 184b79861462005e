use async_trait::async_trait;
use image::DynamicImage;
use serde_json::Value;

use super::vision_chat_client::{VisionChatClient, encode_png};
use crate::application::ports::{ClassScores, ClassifierError, ImageClassifier};
use crate::application::services::strip_code_fence;

pub const CLASSIFIER_PROMPT: &str = "Is this image a photo or scan of a receipt, bill or \
invoice? Answer only with JSON of the form {\"receipt_probability\": p} where p is a number \
between 0 and 1.";

const CLASSIFIER_MAX_TOKENS: u32 = 32;

/// Receipt/not-receipt scoring by a vision-language model.
pub struct VlmReceiptClassifier {
    client: VisionChatClient,
}

impl VlmReceiptClassifier {
    pub fn new(client: VisionChatClient) -> Self {
        Self { client }
    }
}

pub fn parse_receipt_probability(answer: &str) -> Result<f32, ClassifierError> {
    let value: Value = serde_json::from_str(strip_code_fence(answer))
        .map_err(|e| ClassifierError::InvalidResponse(format!("{e}: {answer}")))?;
    let probability = value
        .get("receipt_probability")
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            ClassifierError::InvalidResponse(format!("missing receipt_probability: {answer}"))
        })?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(ClassifierError::InvalidResponse(format!(
            "receipt_probability out of range: {probability}"
        )));
    }
    Ok(probability as f32)
}

#[async_trait]
impl ImageClassifier for VlmReceiptClassifier {
    #[tracing::instrument(skip_all, fields(model = %self.client.model()))]
    async fn score(&self, image: &DynamicImage) -> Result<ClassScores, ClassifierError> {
        let png = encode_png(image).map_err(|e| ClassifierError::EncodingFailed(e.to_string()))?;
        let answer = self
            .client
            .ask(&png, CLASSIFIER_PROMPT, CLASSIFIER_MAX_TOKENS)
            .await
            .map_err(|e| ClassifierError::RequestFailed(e.to_string()))?;
        let probability = parse_receipt_probability(&answer)?;
        Ok(ClassScores::from_target_probability(probability))
    }
}
