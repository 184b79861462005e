use ledgerlens::application::ports::{RepositoryError, TransactionRepository};
use ledgerlens::domain::{
    CurrencyCode, ExtractionMetadata, LineItem, LineItems, MediaKind, OwnerId, RecordId,
    TotalAmount, TransactionRecord, ValidatedResult,
};

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::helpers::test_postgres::TestPostgres;

async fn fetch_row(pool: &PgPool, id: RecordId) -> Option<PgRow> {
    sqlx::query("SELECT * FROM transactions WHERE id = $1")
        .bind(id.as_uuid())
        .fetch_optional(pool)
        .await
        .unwrap()
}

fn record() -> TransactionRecord {
    TransactionRecord::new(
        OwnerId::parse("owner-pg").unwrap(),
        MediaKind::Speech,
        ValidatedResult {
            total_amount: TotalAmount {
                incomes: 0.0,
                expenses: 165000.0,
            },
            line_items: LineItems {
                incomes: Vec::new(),
                expenses: vec![
                    LineItem {
                        description: "Coffee".to_string(),
                        amount: 45000.0,
                        quantity: 1.0,
                        discount: 0.0,
                        amount_after_discount: 45000.0,
                    },
                    LineItem {
                        description: "Lunch".to_string(),
                        amount: 120000.0,
                        quantity: 1.0,
                        discount: 0.0,
                        amount_after_discount: 120000.0,
                    },
                ],
            },
            currency_code: CurrencyCode::Usd,
            tokens_used: 512,
        },
        ExtractionMetadata {
            processing_time_secs: 0.75,
            extraction_error: None,
            truncated: false,
        },
    )
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_record_when_saving_then_it_can_be_read_back() {
    let pg = TestPostgres::new().await;
    let record = record();

    pg.repository.save(&record).await.unwrap();
    let row = fetch_row(&pg.pool, record.id).await.unwrap();

    assert_eq!(row.get::<String, _>("owner_id"), "owner-pg");
    assert_eq!(row.get::<String, _>("source"), "speech");
    assert_eq!(row.get::<f64, _>("total_expenses"), 165000.0);
    assert_eq!(row.get::<String, _>("currency_code"), "USD");
    assert_eq!(row.get::<i64, _>("tokens_used"), 512);
    let line_items: Value = row.get("line_items");
    assert_eq!(line_items["expenses"][1]["description"], json!("Lunch"));
    assert_eq!(line_items["expenses"][1]["amountAfterDiscount"].as_f64(), Some(120000.0));
    assert!(row.get::<Option<String>, _>("extraction_error").is_none());
    let created_at: DateTime<Utc> = row.get("created_at");
    let updated_at: DateTime<Utc> = row.get("updated_at");
    assert!(created_at <= updated_at);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_duplicate_id_when_saving_then_returns_constraint_violation() {
    let pg = TestPostgres::new().await;
    let record = record();

    pg.repository.save(&record).await.unwrap();
    let result = pg.repository.save(&record).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_unsaved_id_when_reading_table_then_nothing_is_stored() {
    let pg = TestPostgres::new().await;

    let found = fetch_row(&pg.pool, RecordId::new()).await;

    assert!(found.is_none());
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
        .fetch_one(&pg.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
