use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{RepositoryError, TransactionRepository};
use crate::domain::TransactionRecord;

pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn classify_write_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::ConstraintViolation(e.to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            RepositoryError::ConnectionFailed(e.to_string())
        }
        _ => RepositoryError::QueryFailed(e.to_string()),
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    #[instrument(skip(self, record), fields(record_id = %record.id))]
    async fn save(&self, record: &TransactionRecord) -> Result<(), RepositoryError> {
        let line_items = serde_json::to_value(&record.line_items)
            .map_err(|e| RepositoryError::Encoding(format!("line items: {e}")))?;
        let tokens_used = i64::try_from(record.tokens_used).unwrap_or(i64::MAX);

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, owner_id, source, total_incomes, total_expenses, line_items,
                currency_code, recorded_at, processing_time_secs, tokens_used,
                extraction_error, truncated, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.owner_id.as_str())
        .bind(record.source.as_str())
        .bind(record.total_amount.incomes)
        .bind(record.total_amount.expenses)
        .bind(line_items)
        .bind(record.currency_code.as_str())
        .bind(record.recorded_at)
        .bind(record.processing_time_secs)
        .bind(tokens_used)
        .bind(record.extraction_error.as_deref())
        .bind(record.truncated)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(classify_write_error)?;

        Ok(())
    }
}
