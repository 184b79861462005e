use crate::domain::{ExtractionRequest, MediaKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaLimits {
    pub max_image_bytes: usize,
    pub max_audio_bytes: usize,
}

impl Default for MediaLimits {
    fn default() -> Self {
        Self {
            max_image_bytes: 10 * 1024 * 1024,
            max_audio_bytes: 25 * 1024 * 1024,
        }
    }
}

impl MediaLimits {
    pub fn max_bytes(&self, kind: MediaKind) -> usize {
        match kind {
            MediaKind::DocumentImage => self.max_image_bytes,
            MediaKind::Speech => self.max_audio_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaValidationError {
    #[error("uploaded file is empty")]
    Empty,
    #[error("file name has no extension: {0}")]
    MissingExtension(String),
    #[error("unsupported {kind} extension: .{extension}")]
    UnsupportedExtension { kind: MediaKind, extension: String },
    #[error("file too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },
}

pub fn validate_media(
    request: &ExtractionRequest,
    kind: MediaKind,
    limits: &MediaLimits,
) -> Result<(), MediaValidationError> {
    if request.media.is_empty() {
        return Err(MediaValidationError::Empty);
    }

    let extension = request
        .extension()
        .ok_or_else(|| MediaValidationError::MissingExtension(request.filename.clone()))?;
    if !kind.accepts_extension(extension) {
        return Err(MediaValidationError::UnsupportedExtension {
            kind,
            extension: extension.to_ascii_lowercase(),
        });
    }

    let max = limits.max_bytes(kind);
    if request.size_bytes() > max {
        return Err(MediaValidationError::TooLarge {
            size: request.size_bytes(),
            max,
        });
    }

    Ok(())
}
