use ledgerlens::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_placeholder() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_it_trimmed() {
    assert_eq!(sanitize_prompt("  Coffee 45000 \n"), "Coffee 45000");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_and_reports_length() {
    let prompt = "a".repeat(250);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"a".repeat(100)));
    assert!(sanitized.ends_with("... (250 chars total)"));
}

#[test]
fn given_multibyte_prompt_when_truncating_then_cuts_on_char_boundary() {
    let prompt = "Cà phê sữa đá ".repeat(20);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.contains("chars total"));
}

#[test]
fn given_credentials_when_sanitizing_then_redacts_every_occurrence() {
    let prompt = "Authorization: Bearer sk-123 then api_key=abc&password=hunter2 token=xyz";

    let sanitized = sanitize_prompt(prompt);

    assert!(!sanitized.contains("sk-123"));
    assert!(!sanitized.contains("abc"));
    assert!(!sanitized.contains("hunter2"));
    assert!(!sanitized.contains("xyz"));
    assert!(sanitized.contains("Bearer [REDACTED]"));
}

#[test]
fn given_repeated_secret_pattern_when_sanitizing_then_redacts_both() {
    let sanitized = sanitize_prompt("secret=one secret=two");

    assert_eq!(sanitized, "secret=[REDACTED] secret=[REDACTED]");
}
