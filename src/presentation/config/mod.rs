mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    BedrockSettings, DatabaseSettings, ExtractionProvider, ExtractionSettings, GateSettings,
    GeminiSettings, LoggingSettings, MediaSettings, RetrySettings, ServerSettings, Settings,
    TranscriptionProvider, TranscriptionSettings, VisionSettings,
};
