use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{FailureClass, PipelineError};
use crate::domain::PipelineStage;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub stage: &'static str,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse {
                error: message.into(),
                stage: PipelineStage::Validating.as_str(),
            },
        }
    }

    pub fn internal(message: impl Into<String>, stage: PipelineStage) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorResponse {
                error: message.into(),
                stage: stage.as_str(),
            },
        }
    }
}

pub fn status_for(class: FailureClass) -> StatusCode {
    match class {
        FailureClass::Rejected => StatusCode::BAD_REQUEST,
        FailureClass::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        FailureClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        FailureClass::Aborted => StatusCode::REQUEST_TIMEOUT,
    }
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        Self {
            status: status_for(error.failure_class()),
            body: ErrorResponse {
                error: error.to_string(),
                stage: error.stage().as_str(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
