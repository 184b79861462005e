use axum::http::StatusCode;

use ledgerlens::application::services::{FailureClass, MediaValidationError, PipelineError};
use ledgerlens::domain::PipelineStage;
use ledgerlens::presentation::handlers::{ApiError, status_for};

#[test]
fn given_failure_classes_when_mapping_then_returns_distinct_statuses() {
    assert_eq!(status_for(FailureClass::Rejected), StatusCode::BAD_REQUEST);
    assert_eq!(
        status_for(FailureClass::Unprocessable),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        status_for(FailureClass::Internal),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(status_for(FailureClass::Aborted), StatusCode::REQUEST_TIMEOUT);
}

#[test]
fn given_pipeline_error_when_converting_then_carries_stage_and_message() {
    let error = PipelineError::InvalidMedia(MediaValidationError::TooLarge { size: 20, max: 10 });

    let api_error = ApiError::from(error);

    assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
    assert_eq!(api_error.body.stage, "VALIDATING");
    assert!(api_error.body.error.contains("too large"));
}

#[test]
fn given_aborted_pipeline_when_converting_then_reports_the_stage_reached() {
    let api_error = ApiError::from(PipelineError::Aborted {
        stage: PipelineStage::Persisting,
    });

    assert_eq!(api_error.status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(api_error.body.stage, "PERSISTING");
}
