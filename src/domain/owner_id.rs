use std::fmt;

use serde::Serialize;

const MAX_OWNER_ID_LENGTH: usize = 100;

/// Identifier of the user/tenant that submitted the media.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("owner id must not be empty".to_string());
        }
        if trimmed.chars().count() > MAX_OWNER_ID_LENGTH {
            return Err(format!(
                "owner id exceeds {} characters",
                MAX_OWNER_ID_LENGTH
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
