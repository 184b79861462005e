mod bedrock_backend;
mod bedrock_extractor;
mod extractor_factory;
mod gemini_backend;
mod gemini_extractor;
pub mod http_status;
mod mock_generation_backend;
mod transcript_extraction;

pub use bedrock_backend::{BedrockBackend, BedrockConfig};
pub use bedrock_extractor::BedrockExtractor;
pub use extractor_factory::{ExtractorFactory, ExtractorFactoryError, retry_policy};
pub use gemini_backend::{GEMINI_DEFAULT_BASE_URL, GeminiBackend, GeminiConfig};
pub use gemini_extractor::GeminiExtractor;
pub use mock_generation_backend::MockGenerationBackend;
pub use transcript_extraction::{DEFAULT_TEMPLATE, build_prompt, extract_with_client};
