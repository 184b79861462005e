use ledgerlens::domain::OwnerId;

#[test]
fn given_padded_owner_id_when_parsing_then_trims_it() {
    let owner = OwnerId::parse("  user-7 ").unwrap();

    assert_eq!(owner.as_str(), "user-7");
}

#[test]
fn given_blank_owner_id_when_parsing_then_fails() {
    assert!(OwnerId::parse("   ").is_err());
}

#[test]
fn given_overlong_owner_id_when_parsing_then_fails() {
    assert!(OwnerId::parse(&"a".repeat(100)).is_ok());
    assert!(OwnerId::parse(&"a".repeat(101)).is_err());
}
