mod connection_liveness;
mod pg_pool;
mod repositories;

pub use connection_liveness::ConnectionLiveness;
pub use pg_pool::{create_lazy_pool, create_pool, run_migrations};
pub use repositories::{MockTransactionRepository, PgTransactionRepository, StaticLiveness};
