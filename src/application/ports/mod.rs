mod abort_signal;
mod generation_backend;
mod image_classifier;
mod recognition_adapter;
mod repository_error;
mod storage_liveness;
mod transaction_extractor;
mod transaction_repository;

pub use abort_signal::{AbortHandle, AbortOnDrop, AbortSignal};
pub use generation_backend::{
    Candidate, FinishReason, GenerationBackend, GenerationOutput, GenerationResponse,
    ProviderCallOutcome, ProviderFailure, TokenUsage,
};
pub use image_classifier::{ClassScores, ClassifierError, ImageClassifier};
pub use recognition_adapter::{Recognition, RecognitionAdapter, RecognitionError};
pub use repository_error::RepositoryError;
pub use storage_liveness::StorageLiveness;
pub use transaction_extractor::{ExtractedTransaction, ExtractionError, TransactionExtractor};
pub use transaction_repository::TransactionRepository;
