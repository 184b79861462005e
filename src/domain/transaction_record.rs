use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    CurrencyCode, LineItems, MediaKind, OwnerId, RecordId, TotalAmount, ValidatedResult,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: RecordId,
    pub owner_id: OwnerId,
    pub source: MediaKind,
    pub total_amount: TotalAmount,
    pub line_items: LineItems,
    pub currency_code: CurrencyCode,
    pub recorded_at: DateTime<Utc>,
    pub processing_time_secs: f64,
    pub tokens_used: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_error: Option<String>,
    pub truncated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Extraction metadata that is not part of the validated payload itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionMetadata {
    pub processing_time_secs: f64,
    pub extraction_error: Option<String>,
    pub truncated: bool,
}

impl TransactionRecord {
    pub fn new(
        owner_id: OwnerId,
        source: MediaKind,
        result: ValidatedResult,
        metadata: ExtractionMetadata,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            owner_id,
            source,
            total_amount: result.total_amount,
            line_items: result.line_items,
            currency_code: result.currency_code,
            recorded_at: now,
            processing_time_secs: metadata.processing_time_secs,
            tokens_used: result.tokens_used,
            extraction_error: metadata.extraction_error,
            truncated: metadata.truncated,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bumps `updated_at`, never moving it before `created_at`.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = now.max(self.created_at);
    }

    pub fn has_extraction_error(&self) -> bool {
        self.extraction_error.is_some()
    }
}
