use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use super::upload::{read_upload, run_pipeline};
use crate::domain::MediaKind;
use crate::presentation::state::AppState;

/// `POST /api/v1/bills`: receipt image to transaction record.
#[tracing::instrument(skip_all)]
pub async fn bills_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    match read_upload(&headers, multipart).await {
        Ok(request) => {
            run_pipeline(Arc::clone(&state.pipeline), request, MediaKind::DocumentImage).await
        }
        Err(e) => e.into_response(),
    }
}
