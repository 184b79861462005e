pub mod audio_decoder;
mod candle_whisper_recognizer;
mod lazy_recognizer;
mod mock_recognizer;
mod openai_whisper_recognizer;
mod recognizer_factory;
pub mod text_sanitizer;
mod vision_chat_client;
mod vlm_ocr_recognizer;
mod vlm_receipt_classifier;

pub use candle_whisper_recognizer::CandleWhisperRecognizer;
pub use lazy_recognizer::LazyRecognizer;
pub use mock_recognizer::{MockImageClassifier, MockRecognizer};
pub use openai_whisper_recognizer::OpenAiWhisperRecognizer;
pub use recognizer_factory::RecognizerFactory;
pub use vision_chat_client::{VisionCallError, VisionChatClient, encode_png};
pub use vlm_ocr_recognizer::{OCR_PROMPT, VlmOcrRecognizer};
pub use vlm_receipt_classifier::{
    CLASSIFIER_PROMPT, VlmReceiptClassifier, parse_receipt_probability,
};
