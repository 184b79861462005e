use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    DocumentImage,
    Speech,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::DocumentImage => "document_image",
            MediaKind::Speech => "speech",
        }
    }

    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            MediaKind::DocumentImage => &["jpg", "jpeg", "png", "bmp", "tiff", "gif"],
            MediaKind::Speech => &["mp3", "wav", "m4a", "flac", "aac", "ogg"],
        }
    }

    pub fn accepts_extension(&self, extension: &str) -> bool {
        let lowered = extension.to_ascii_lowercase();
        self.allowed_extensions().contains(&lowered.as_str())
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
