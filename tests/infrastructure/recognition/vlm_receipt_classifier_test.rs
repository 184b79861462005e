use ledgerlens::application::ports::ClassifierError;
use ledgerlens::infrastructure::recognition::parse_receipt_probability;

#[test]
fn given_plain_json_answer_when_parsing_then_returns_probability() {
    let probability = parse_receipt_probability(r#"{"receipt_probability": 0.92}"#).unwrap();

    assert!((probability - 0.92).abs() < 1e-6);
}

#[test]
fn given_fenced_answer_when_parsing_then_returns_probability() {
    let answer = "```json\n{\"receipt_probability\": 0.1}\n```";

    let probability = parse_receipt_probability(answer).unwrap();

    assert!((probability - 0.1).abs() < 1e-6);
}

#[test]
fn given_out_of_range_probability_when_parsing_then_fails() {
    let result = parse_receipt_probability(r#"{"receipt_probability": 1.7}"#);

    assert!(matches!(result, Err(ClassifierError::InvalidResponse(_))));
}

#[test]
fn given_prose_answer_when_parsing_then_fails() {
    assert!(parse_receipt_probability("Yes, this is a receipt.").is_err());
    assert!(parse_receipt_probability(r#"{"probability": 0.5}"#).is_err());
}
