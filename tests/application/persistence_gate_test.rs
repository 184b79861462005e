use std::sync::Arc;

use ledgerlens::application::services::PersistenceGate;
use ledgerlens::domain::{
    ExtractionMetadata, MediaKind, TransactionRecord, ValidatedResult,
};
use ledgerlens::infrastructure::persistence::{MockTransactionRepository, StaticLiveness};

use crate::helpers::fixtures::owner;

fn record() -> TransactionRecord {
    TransactionRecord::new(
        owner(),
        MediaKind::DocumentImage,
        ValidatedResult::default(),
        ExtractionMetadata::default(),
    )
}

#[tokio::test]
async fn given_reachable_storage_when_saving_then_record_is_written() {
    let repository = Arc::new(MockTransactionRepository::new());
    let gate = PersistenceGate::new(Arc::new(StaticLiveness(true)), repository.clone());
    let record = record();

    let saved = gate.try_save(&record).await;

    assert!(saved);
    assert_eq!(repository.saved_ids(), vec![record.id]);
}

#[tokio::test]
async fn given_unreachable_storage_when_saving_then_skips_write_and_reports_false() {
    let repository = Arc::new(MockTransactionRepository::new());
    let gate = PersistenceGate::new(Arc::new(StaticLiveness(false)), repository.clone());

    let saved = gate.try_save(&record()).await;

    assert!(!saved);
    assert!(repository.saved().is_empty());
}

#[tokio::test]
async fn given_failing_repository_when_saving_then_error_is_swallowed() {
    let repository = Arc::new(MockTransactionRepository::failing());
    let gate = PersistenceGate::new(Arc::new(StaticLiveness(true)), repository.clone());

    let saved = gate.try_save(&record()).await;

    assert!(!saved);
}
