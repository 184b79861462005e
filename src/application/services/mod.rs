mod content_gate;
mod extraction_pipeline;
mod generation_client;
mod media_validator;
mod persistence_gate;
mod response_normalizer;

pub use content_gate::{
    ContentGate, ContentGateError, DEFAULT_GATE_THRESHOLD, GATE_INPUT_SIZE, GateDecision, decide,
};
pub use extraction_pipeline::{
    ExtractionPipeline, FailureClass, PipelineError, PipelineOptions, ProcessedTransaction,
    PromptTemplates,
};
pub use generation_client::{GenerationClient, RetryPolicy, validate_response};
pub use media_validator::{MediaLimits, MediaValidationError, validate_media};
pub use persistence_gate::PersistenceGate;
pub use response_normalizer::{normalize_outcome, strip_code_fence};
