use reqwest::StatusCode;

use ledgerlens::application::ports::ProviderFailure;
use ledgerlens::infrastructure::llm::http_status::classify_status;

#[test]
fn given_transient_statuses_when_classifying_then_they_are_retryable() {
    let cases = [
        StatusCode::TOO_MANY_REQUESTS,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::BAD_GATEWAY,
        StatusCode::SERVICE_UNAVAILABLE,
        StatusCode::REQUEST_TIMEOUT,
        StatusCode::GATEWAY_TIMEOUT,
    ];

    for status in cases {
        assert!(
            classify_status(status, "").is_retryable(),
            "{status} should be retryable"
        );
    }
}

#[test]
fn given_client_errors_when_classifying_then_they_are_fatal() {
    for status in [
        StatusCode::BAD_REQUEST,
        StatusCode::UNAUTHORIZED,
        StatusCode::FORBIDDEN,
        StatusCode::NOT_FOUND,
    ] {
        assert!(matches!(
            classify_status(status, "nope"),
            ProviderFailure::Fatal(_)
        ));
    }
}

#[test]
fn given_rate_limit_when_classifying_then_is_rate_limited_with_detail() {
    let failure = classify_status(StatusCode::TOO_MANY_REQUESTS, "quota exceeded");

    assert!(matches!(&failure, ProviderFailure::RateLimited(msg) if msg.contains("quota")));
}

#[test]
fn given_huge_body_when_classifying_then_detail_is_bounded() {
    let body = "é".repeat(1000);

    let ProviderFailure::Fatal(detail) = classify_status(StatusCode::BAD_REQUEST, &body) else {
        panic!("expected fatal");
    };

    assert!(detail.chars().count() < 400);
}
