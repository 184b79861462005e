use ledgerlens::domain::{
    CurrencyCode, ExtractionMetadata, LineItem, LineItems, MediaKind, OwnerId, TotalAmount,
    TransactionRecord, ValidatedResult,
};

fn validated() -> ValidatedResult {
    ValidatedResult {
        total_amount: TotalAmount {
            incomes: 0.0,
            expenses: 45000.0,
        },
        line_items: LineItems {
            incomes: Vec::new(),
            expenses: vec![LineItem {
                description: "Coffee".to_string(),
                amount: 45000.0,
                quantity: 1.0,
                discount: 0.0,
                amount_after_discount: 45000.0,
            }],
        },
        currency_code: CurrencyCode::Vnd,
        tokens_used: 321,
    }
}

#[test]
fn given_validated_result_when_creating_record_then_copies_payload_and_metadata() {
    let owner = OwnerId::parse("owner-1").unwrap();

    let record = TransactionRecord::new(
        owner.clone(),
        MediaKind::Speech,
        validated(),
        ExtractionMetadata {
            processing_time_secs: 1.5,
            extraction_error: None,
            truncated: true,
        },
    );

    assert_eq!(record.owner_id, owner);
    assert_eq!(record.source, MediaKind::Speech);
    assert_eq!(record.total_amount.expenses, 45000.0);
    assert_eq!(record.line_items.len(), 1);
    assert_eq!(record.tokens_used, 321);
    assert_eq!(record.processing_time_secs, 1.5);
    assert!(record.truncated);
    assert!(!record.has_extraction_error());
    assert_eq!(record.created_at, record.updated_at);
}

#[test]
fn given_record_when_touching_then_updated_at_never_precedes_created_at() {
    let mut record = TransactionRecord::new(
        OwnerId::parse("owner-1").unwrap(),
        MediaKind::DocumentImage,
        validated(),
        ExtractionMetadata::default(),
    );

    record.touch();

    assert!(record.updated_at >= record.created_at);
}

#[test]
fn given_record_when_serializing_then_uses_camel_case_and_omits_missing_error() {
    let record = TransactionRecord::new(
        OwnerId::parse("owner-1").unwrap(),
        MediaKind::DocumentImage,
        validated(),
        ExtractionMetadata::default(),
    );

    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["ownerId"], "owner-1");
    assert_eq!(json["source"], "document_image");
    assert_eq!(json["currencyCode"], "VND");
    assert_eq!(json["tokensUsed"], 321);
    assert_eq!(json["lineItems"]["expenses"][0]["description"], "Coffee");
    assert!(json.get("extractionError").is_none());
}

#[test]
fn given_two_records_then_ids_are_unique() {
    let make = || {
        TransactionRecord::new(
            OwnerId::parse("owner-1").unwrap(),
            MediaKind::DocumentImage,
            validated(),
            ExtractionMetadata::default(),
        )
    };

    assert_ne!(make().id, make().id);
}
