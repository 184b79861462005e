use ledgerlens::infrastructure::observability::{DEFAULT_LOG_FILTER, TracingConfig};

#[test]
fn given_explicit_level_when_building_config_then_uses_it_as_filter() {
    let config = TracingConfig::new("test", true, "warn,ledgerlens=info");

    assert_eq!(config.environment, "test");
    assert_eq!(config.default_filter, "warn,ledgerlens=info");
    assert!(config.json_format);
}

#[test]
fn given_blank_level_when_building_config_then_falls_back_to_default_filter() {
    let config = TracingConfig::new("local", false, "  ");

    assert_eq!(config.default_filter, DEFAULT_LOG_FILTER);
}
