use serde::{Deserialize, Serialize};

/// Axis-aligned region of an OCR hit, in source image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    pub top_left: (i32, i32),
    pub bottom_right: (i32, i32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrSegment {
    pub text: String,
    pub confidence: f32,
    pub region: Option<BoundingRegion>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecognizedText {
    Plain(String),
    Segments(Vec<OcrSegment>),
}

impl RecognizedText {
    /// Text handed to the generation backend. Segments are joined one per line.
    pub fn to_prompt_text(&self) -> String {
        match self {
            RecognizedText::Plain(text) => text.trim().to_string(),
            RecognizedText::Segments(segments) => segments
                .iter()
                .map(|s| s.text.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            RecognizedText::Plain(text) => text.trim().is_empty(),
            RecognizedText::Segments(segments) => segments.iter().all(|s| s.text.trim().is_empty()),
        }
    }
}

impl From<String> for RecognizedText {
    fn from(text: String) -> Self {
        RecognizedText::Plain(text)
    }
}

impl From<&str> for RecognizedText {
    fn from(text: &str) -> Self {
        RecognizedText::Plain(text.to_string())
    }
}
