mod currency_code;
mod extraction_request;
mod line_item;
mod media_kind;
mod owner_id;
mod pipeline_stage;
mod raw_extraction;
mod recognized_text;
mod record_id;
mod schema_coercion;
mod transaction_record;
mod validated_result;

pub use currency_code::CurrencyCode;
pub use extraction_request::ExtractionRequest;
pub use line_item::{
    DEFAULT_QUANTITY, DISCOUNT_TOLERANCE, LineItem, LineItems, MAX_DESCRIPTION_LENGTH, TotalAmount,
};
pub use media_kind::MediaKind;
pub use owner_id::OwnerId;
pub use pipeline_stage::PipelineStage;
pub use raw_extraction::{
    CURRENCY_CODE_KEY, ERROR_KEY, ERROR_KIND_KEY, ExtractionErrorKind, LINE_ITEMS_KEY,
    RAW_RESPONSE_KEY, RawExtraction, TOKENS_USED_KEY, TOTAL_AMOUNT_KEY, TRUNCATED_KEY,
};
pub use recognized_text::{BoundingRegion, OcrSegment, RecognizedText};
pub use record_id::RecordId;
pub use schema_coercion::{SchemaValidationError, coerce};
pub use transaction_record::{ExtractionMetadata, TransactionRecord};
pub use validated_result::ValidatedResult;
