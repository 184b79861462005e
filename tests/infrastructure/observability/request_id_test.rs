use ledgerlens::infrastructure::observability::resolve_request_id;
use uuid::Uuid;

#[test]
fn given_well_formed_incoming_id_when_resolving_then_reuses_it() {
    assert_eq!(resolve_request_id(Some(" req-42 ")), "req-42");
}

#[test]
fn given_no_incoming_id_when_resolving_then_mints_uuid() {
    let id = resolve_request_id(None);

    assert!(Uuid::parse_str(&id).is_ok());
}

#[test]
fn given_malformed_incoming_id_when_resolving_then_mints_uuid() {
    let with_space = resolve_request_id(Some("two words"));
    let too_long = resolve_request_id(Some(&"x".repeat(129)));
    let blank = resolve_request_id(Some("  "));

    assert!(Uuid::parse_str(&with_space).is_ok());
    assert!(Uuid::parse_str(&too_long).is_ok());
    assert!(Uuid::parse_str(&blank).is_ok());
}

#[test]
fn given_two_requests_without_ids_then_minted_ids_differ() {
    assert_ne!(resolve_request_id(None), resolve_request_id(None));
}
