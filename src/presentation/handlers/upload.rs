use std::sync::Arc;

use axum::Json;
use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::error_response::ApiError;
use crate::application::ports::{AbortHandle, AbortSignal};
use crate::application::services::{ExtractionPipeline, PipelineError, ProcessedTransaction};
use crate::domain::{ExtractionRequest, MediaKind, OwnerId, PipelineStage, TransactionRecord};

pub const OWNER_ID_HEADER: &str = "x-owner-id";
const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct ExtractionResponse {
    pub record: TransactionRecord,
    pub saved: bool,
}

impl From<ProcessedTransaction> for ExtractionResponse {
    fn from(processed: ProcessedTransaction) -> Self {
        Self {
            record: processed.record,
            saved: processed.saved,
        }
    }
}

/// Pulls the owner header and the `file` multipart field into a request.
pub async fn read_upload(
    headers: &HeaderMap,
    mut multipart: Multipart,
) -> Result<ExtractionRequest, ApiError> {
    let raw_owner = headers
        .get(OWNER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::bad_request(format!("missing {OWNER_ID_HEADER} header")))?;
    let owner_id = OwnerId::parse(raw_owner).map_err(ApiError::bad_request)?;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(ApiError::bad_request("no file uploaded")),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(ApiError::bad_request(format!(
                    "failed to read multipart: {e}"
                )));
            }
        };
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read uploaded file");
            ApiError::bad_request(format!("failed to read file: {e}"))
        })?;
        tracing::debug!(filename = %filename, bytes = data.len(), "Upload received");
        return Ok(ExtractionRequest::new(data.to_vec(), filename, owner_id));
    }
}

/// Runs the pipeline on its own task. If the handler future is dropped
/// (client went away) the guard fires the abort signal.
pub async fn run_pipeline(
    pipeline: Arc<ExtractionPipeline>,
    request: ExtractionRequest,
    kind: MediaKind,
) -> Response {
    let (handle, signal) = AbortHandle::new();
    let guard = handle.abort_on_drop();

    let task = tokio::spawn(async move { process(&pipeline, request, kind, &signal).await });
    let joined = task.await;
    guard.disarm();

    match joined {
        Ok(Ok(processed)) => {
            (StatusCode::OK, Json(ExtractionResponse::from(processed))).into_response()
        }
        Ok(Err(e)) => ApiError::from(e).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Pipeline task failed");
            ApiError::internal("pipeline task failed", PipelineStage::Responding).into_response()
        }
    }
}

async fn process(
    pipeline: &ExtractionPipeline,
    request: ExtractionRequest,
    kind: MediaKind,
    abort: &AbortSignal,
) -> Result<ProcessedTransaction, PipelineError> {
    match kind {
        MediaKind::DocumentImage => pipeline.process_document(request, abort).await,
        MediaKind::Speech => pipeline.process_speech(request, abort).await,
    }
}
