mod bills;
mod error_response;
mod health;
mod upload;
mod voices;

pub use bills::bills_handler;
pub use error_response::{ApiError, ErrorResponse, status_for};
pub use health::{HealthResponse, health_handler};
pub use upload::{ExtractionResponse, OWNER_ID_HEADER};
pub use voices::voices_handler;
