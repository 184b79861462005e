mod mock_transaction_repository;
mod pg_transaction_repository;

pub use mock_transaction_repository::{MockTransactionRepository, StaticLiveness};
pub use pg_transaction_repository::PgTransactionRepository;
