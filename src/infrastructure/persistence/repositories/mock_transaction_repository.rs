use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::application::ports::{RepositoryError, StorageLiveness, TransactionRepository};
use crate::domain::{RecordId, TransactionRecord};

/// Keeps saved records in memory; can be switched to fail every write.
#[derive(Default)]
pub struct MockTransactionRepository {
    saved: Mutex<Vec<TransactionRecord>>,
    fail_writes: AtomicBool,
}

impl MockTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let repository = Self::default();
        repository.fail_writes.store(true, Ordering::SeqCst);
        repository
    }

    pub fn saved(&self) -> Vec<TransactionRecord> {
        match self.saved.lock() {
            Ok(saved) => saved.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn saved_ids(&self) -> Vec<RecordId> {
        self.saved().iter().map(|r| r.id).collect()
    }
}

#[async_trait]
impl TransactionRepository for MockTransactionRepository {
    async fn save(&self, record: &TransactionRecord) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConnectionFailed(
                "mock repository configured to fail".to_string(),
            ));
        }
        let mut saved = self
            .saved
            .lock()
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        saved.push(record.clone());
        Ok(())
    }
}

/// Liveness that never changes.
pub struct StaticLiveness(pub bool);

impl StorageLiveness for StaticLiveness {
    fn is_reachable(&self) -> bool {
        self.0
    }
}
