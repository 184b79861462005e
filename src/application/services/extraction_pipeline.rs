use std::path::PathBuf;
use std::sync::Arc;

use tempfile::NamedTempFile;
use tracing::{Instrument, debug, info, info_span, warn};

use super::{
    ContentGate, ContentGateError, MediaLimits, MediaValidationError, PersistenceGate,
    validate_media,
};
use crate::application::ports::{
    AbortSignal, ClassifierError, ExtractionError, RecognitionAdapter, RecognitionError,
    TransactionExtractor,
};
use crate::domain::{
    ExtractionMetadata, ExtractionRequest, MediaKind, PipelineStage, TransactionRecord,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub document: String,
    pub speech: String,
}

impl PromptTemplates {
    pub fn for_kind(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::DocumentImage => &self.document,
            MediaKind::Speech => &self.speech,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub templates: PromptTemplates,
    pub limits: MediaLimits,
    /// Directory for staged media; the system temp dir when unset.
    pub temp_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ProcessedTransaction {
    pub record: TransactionRecord,
    pub saved: bool,
}

/// End-to-end handling of one upload: validate, gate, recognize, extract,
/// coerce, persist.
pub struct ExtractionPipeline {
    gate: ContentGate,
    document_recognizer: Arc<dyn RecognitionAdapter>,
    speech_recognizer: Arc<dyn RecognitionAdapter>,
    extractor: Arc<dyn TransactionExtractor>,
    persistence: PersistenceGate,
    options: PipelineOptions,
}

impl ExtractionPipeline {
    pub fn new(
        gate: ContentGate,
        document_recognizer: Arc<dyn RecognitionAdapter>,
        speech_recognizer: Arc<dyn RecognitionAdapter>,
        extractor: Arc<dyn TransactionExtractor>,
        persistence: PersistenceGate,
        options: PipelineOptions,
    ) -> Self {
        Self {
            gate,
            document_recognizer,
            speech_recognizer,
            extractor,
            persistence,
            options,
        }
    }

    pub fn provider(&self) -> &'static str {
        self.extractor.provider()
    }

    pub fn storage_reachable(&self) -> bool {
        self.persistence.is_reachable()
    }

    pub async fn process_document(
        &self,
        request: ExtractionRequest,
        abort: &AbortSignal,
    ) -> Result<ProcessedTransaction, PipelineError> {
        self.process(request, MediaKind::DocumentImage, abort).await
    }

    pub async fn process_speech(
        &self,
        request: ExtractionRequest,
        abort: &AbortSignal,
    ) -> Result<ProcessedTransaction, PipelineError> {
        self.process(request, MediaKind::Speech, abort).await
    }

    async fn process(
        &self,
        request: ExtractionRequest,
        kind: MediaKind,
        abort: &AbortSignal,
    ) -> Result<ProcessedTransaction, PipelineError> {
        let span = info_span!(
            "extraction_pipeline",
            source = %kind,
            owner_id = %request.owner_id,
            filename = %request.filename,
            provider = self.extractor.provider(),
        );
        let result = self
            .run_stages(request, kind, abort)
            .instrument(span.clone())
            .await;
        if let Err(e) = &result {
            let _entered = span.enter();
            warn!(
                error = %e,
                stage = %e.stage(),
                class = e.failure_class().as_str(),
                "Pipeline failed"
            );
        }
        result
    }

    async fn run_stages(
        &self,
        request: ExtractionRequest,
        kind: MediaKind,
        abort: &AbortSignal,
    ) -> Result<ProcessedTransaction, PipelineError> {
        debug!(
            stage = %PipelineStage::Validating,
            size_bytes = request.size_bytes(),
            "Stage entered"
        );
        validate_media(&request, kind, &self.options.limits)?;

        if kind == MediaKind::DocumentImage {
            debug!(stage = %PipelineStage::Gating, "Stage entered");
            let decision = self
                .gate
                .classify(&request.media)
                .await
                .map_err(PipelineError::from_gate)?;
            if !decision.is_target_class {
                return Err(PipelineError::RejectedByGate {
                    confidence: decision.confidence,
                });
            }
        }

        debug!(stage = %PipelineStage::Recognizing, "Stage entered");
        let recognized = self.recognize(&request, kind).await?;

        if abort.is_aborted() {
            return Err(PipelineError::Aborted {
                stage: PipelineStage::Extracting,
            });
        }

        debug!(
            stage = %PipelineStage::Extracting,
            chars = recognized.len(),
            "Stage entered"
        );
        let extracted = self
            .extractor
            .extract_validated(&recognized, self.options.templates.for_kind(kind), abort)
            .await
            .map_err(PipelineError::Extraction)?;
        debug!(
            stage = %PipelineStage::Coercing,
            items = extracted.result.line_items.len(),
            "Stage completed"
        );

        let metadata = ExtractionMetadata {
            processing_time_secs: extracted.processing_time.as_secs_f64(),
            extraction_error: extracted.raw.error().map(str::to_string),
            truncated: extracted.raw.is_truncated(),
        };
        let mut record = TransactionRecord::new(request.owner_id, kind, extracted.result, metadata);

        if abort.is_aborted() {
            return Err(PipelineError::Aborted {
                stage: PipelineStage::Persisting,
            });
        }

        debug!(stage = %PipelineStage::Persisting, "Stage entered");
        record.touch();
        let saved = self.persistence.try_save(&record).await;

        info!(
            stage = %PipelineStage::Responding,
            record_id = %record.id,
            saved,
            tokens_used = record.tokens_used,
            extraction_error = record.has_extraction_error(),
            "Transaction extracted"
        );
        Ok(ProcessedTransaction { record, saved })
    }

    /// Stages the media in a temp file for the recognizer. The file is removed
    /// when this returns, on every path.
    async fn recognize(
        &self,
        request: &ExtractionRequest,
        kind: MediaKind,
    ) -> Result<String, PipelineError> {
        let staged = self.stage_media(request)?;
        tokio::fs::write(staged.path(), &request.media)
            .await
            .map_err(PipelineError::TempFile)?;

        let recognizer = match kind {
            MediaKind::DocumentImage => &self.document_recognizer,
            MediaKind::Speech => &self.speech_recognizer,
        };
        let recognition = recognizer.transcribe(staged.path()).await?;
        drop(staged);

        if recognition.text.is_blank() {
            return Err(PipelineError::BlankRecognition);
        }
        debug!(model = %recognition.model_name, "Media recognized");
        Ok(recognition.text.to_prompt_text())
    }

    fn stage_media(&self, request: &ExtractionRequest) -> Result<NamedTempFile, PipelineError> {
        let suffix = request
            .extension()
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();
        let mut builder = tempfile::Builder::new();
        builder.prefix("ledgerlens-").suffix(&suffix);
        let staged = match &self.options.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        staged.map_err(PipelineError::TempFile)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Rejected,
    Unprocessable,
    Internal,
    Aborted,
}

impl FailureClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureClass::Rejected => "rejected",
            FailureClass::Unprocessable => "unprocessable",
            FailureClass::Internal => "internal",
            FailureClass::Aborted => "aborted",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid media: {0}")]
    InvalidMedia(#[from] MediaValidationError),
    #[error("unsupported media: {0}")]
    UnsupportedMedia(String),
    #[error("image is not a receipt (confidence {confidence:.2})")]
    RejectedByGate { confidence: f32 },
    #[error("content gate failed: {0}")]
    Classifier(ClassifierError),
    #[error("recognition failed: {0}")]
    Recognition(#[from] RecognitionError),
    #[error("no text recognized in media")]
    BlankRecognition,
    #[error("extraction failed: {0}")]
    Extraction(ExtractionError),
    #[error("temporary media file: {0}")]
    TempFile(std::io::Error),
    #[error("request aborted before {stage}")]
    Aborted { stage: PipelineStage },
}

impl PipelineError {
    fn from_gate(error: ContentGateError) -> Self {
        match error {
            ContentGateError::UnsupportedMedia(msg) => PipelineError::UnsupportedMedia(msg),
            ContentGateError::Classifier(e) => PipelineError::Classifier(e),
        }
    }

    pub fn failure_class(&self) -> FailureClass {
        match self {
            PipelineError::InvalidMedia(_)
            | PipelineError::UnsupportedMedia(_)
            | PipelineError::RejectedByGate { .. } => FailureClass::Rejected,
            PipelineError::Recognition(_)
            | PipelineError::BlankRecognition
            | PipelineError::Extraction(_) => FailureClass::Unprocessable,
            PipelineError::Classifier(_) | PipelineError::TempFile(_) => FailureClass::Internal,
            PipelineError::Aborted { .. } => FailureClass::Aborted,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::InvalidMedia(_) => PipelineStage::Validating,
            PipelineError::UnsupportedMedia(_)
            | PipelineError::RejectedByGate { .. }
            | PipelineError::Classifier(_) => PipelineStage::Gating,
            PipelineError::Recognition(_)
            | PipelineError::BlankRecognition
            | PipelineError::TempFile(_) => PipelineStage::Recognizing,
            PipelineError::Extraction(ExtractionError::Schema(_)) => PipelineStage::Coercing,
            PipelineError::Extraction(ExtractionError::EmptyInput) => PipelineStage::Extracting,
            PipelineError::Aborted { stage } => *stage,
        }
    }
}
