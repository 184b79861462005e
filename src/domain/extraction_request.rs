use std::path::Path;

use super::OwnerId;

/// One incoming upload, owned by a single pipeline invocation.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub media: Vec<u8>,
    pub filename: String,
    pub owner_id: OwnerId,
}

impl ExtractionRequest {
    pub fn new(media: Vec<u8>, filename: impl Into<String>, owner_id: OwnerId) -> Self {
        Self {
            media,
            filename: filename.into(),
            owner_id,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
    }

    pub fn size_bytes(&self) -> usize {
        self.media.len()
    }
}
