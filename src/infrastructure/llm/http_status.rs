use reqwest::StatusCode;

use crate::application::ports::ProviderFailure;

const MAX_BODY_IN_ERROR: usize = 300;

/// Maps a non-success HTTP status onto the retry taxonomy.
pub fn classify_status(status: StatusCode, body: &str) -> ProviderFailure {
    let detail = format!("HTTP {}: {}", status, truncate_body(body));
    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderFailure::RateLimited(detail),
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE => ProviderFailure::ServiceUnavailable(detail),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProviderFailure::DeadlineExceeded(detail)
        }
        _ => ProviderFailure::Fatal(detail),
    }
}

/// Maps a transport-level error (no HTTP status) onto the retry taxonomy.
pub fn classify_transport(error: &reqwest::Error) -> ProviderFailure {
    if error.is_timeout() {
        ProviderFailure::DeadlineExceeded(error.to_string())
    } else if error.is_connect() || error.is_request() {
        ProviderFailure::ServiceUnavailable(error.to_string())
    } else {
        ProviderFailure::Fatal(error.to_string())
    }
}

/// Maps a failure while reading a success body. The status already arrived, so
/// anything other than a deadline is treated as a dropped connection.
pub fn classify_body(error: &reqwest::Error) -> ProviderFailure {
    if error.is_timeout() {
        ProviderFailure::DeadlineExceeded(error.to_string())
    } else {
        ProviderFailure::ServiceUnavailable(error.to_string())
    }
}

fn truncate_body(body: &str) -> &str {
    match body.char_indices().nth(MAX_BODY_IN_ERROR) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
