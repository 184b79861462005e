use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::ports::{StorageLiveness, TransactionRepository};
use crate::domain::TransactionRecord;

/// Best-effort write path: storage trouble is logged and reported as `false`,
/// never raised to the caller.
pub struct PersistenceGate {
    liveness: Arc<dyn StorageLiveness>,
    repository: Arc<dyn TransactionRepository>,
}

impl PersistenceGate {
    pub fn new(
        liveness: Arc<dyn StorageLiveness>,
        repository: Arc<dyn TransactionRepository>,
    ) -> Self {
        Self {
            liveness,
            repository,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.liveness.is_reachable()
    }

    #[instrument(skip(self, record), fields(record_id = %record.id, owner_id = %record.owner_id))]
    pub async fn try_save(&self, record: &TransactionRecord) -> bool {
        if !self.liveness.is_reachable() {
            warn!("Storage unreachable, skipping save");
            return false;
        }

        match self.repository.save(record).await {
            Ok(()) => {
                debug!("Transaction record saved");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to save transaction record");
                false
            }
        }
    }
}
