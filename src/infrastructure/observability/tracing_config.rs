pub const DEFAULT_LOG_FILTER: &str = "info,ledgerlens=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` forces JSON output regardless of `enable_json`.
    pub fn new(environment: impl Into<String>, enable_json: bool, level: &str) -> Self {
        let json_from_env = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let default_filter = if level.trim().is_empty() {
            DEFAULT_LOG_FILTER.to_string()
        } else {
            level.to_string()
        };
        Self {
            environment: environment.into(),
            json_format: enable_json || json_from_env,
            default_filter,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        Self::new(environment, false, DEFAULT_LOG_FILTER)
    }
}
