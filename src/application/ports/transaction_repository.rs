use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::TransactionRecord;

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn save(&self, record: &TransactionRecord) -> Result<(), RepositoryError>;
}
