use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use image::DynamicImage;

use crate::application::ports::{
    ClassScores, ClassifierError, ImageClassifier, Recognition, RecognitionAdapter,
    RecognitionError,
};
use crate::domain::RecognizedText;

/// Returns a fixed transcript and remembers which paths it was handed and
/// whether they existed at call time.
pub struct MockRecognizer {
    text: Option<RecognizedText>,
    calls: Mutex<Vec<(PathBuf, bool)>>,
}

impl MockRecognizer {
    pub fn returning(text: impl Into<RecognizedText>) -> Self {
        Self {
            text: Some(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(path, existed_during_call)` per invocation.
    pub fn calls(&self) -> Vec<(PathBuf, bool)> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl RecognitionAdapter for MockRecognizer {
    async fn transcribe(&self, media_path: &Path) -> Result<Recognition, RecognitionError> {
        let existed = media_path.exists();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((media_path.to_path_buf(), existed));
        }
        match &self.text {
            Some(text) => Ok(Recognition {
                text: text.clone(),
                model_name: "mock".to_string(),
            }),
            None => Err(RecognitionError::RecognitionFailed(
                "mock recognizer failure".to_string(),
            )),
        }
    }
}

pub struct MockImageClassifier {
    scores: ClassScores,
}

impl MockImageClassifier {
    pub fn new(target: f32, not_target: f32) -> Self {
        Self {
            scores: ClassScores { target, not_target },
        }
    }
}

#[async_trait]
impl ImageClassifier for MockImageClassifier {
    async fn score(&self, _image: &DynamicImage) -> Result<ClassScores, ClassifierError> {
        Ok(self.scores)
    }
}
