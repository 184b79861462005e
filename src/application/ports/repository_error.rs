#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage connection failed: {0}")]
    ConnectionFailed(String),
    #[error("storage query failed: {0}")]
    QueryFailed(String),
    #[error("record rejected by a storage constraint: {0}")]
    ConstraintViolation(String),
    #[error("record could not be encoded: {0}")]
    Encoding(String),
}
