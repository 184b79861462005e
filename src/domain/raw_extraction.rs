use serde_json::{Map, Value, json};

pub const TOTAL_AMOUNT_KEY: &str = "totalAmount";
pub const LINE_ITEMS_KEY: &str = "lineItems";
pub const CURRENCY_CODE_KEY: &str = "currencyCode";
pub const TOKENS_USED_KEY: &str = "tokensUsed";
pub const ERROR_KEY: &str = "error";
pub const ERROR_KIND_KEY: &str = "errorKind";
pub const RAW_RESPONSE_KEY: &str = "rawResponse";
pub const TRUNCATED_KEY: &str = "truncated";

const LEGACY_ALIASES: [(&str, &str); 4] = [
    ("total_amount", TOTAL_AMOUNT_KEY),
    ("transactions", LINE_ITEMS_KEY),
    ("money_type", CURRENCY_CODE_KEY),
    ("tokens_used", TOKENS_USED_KEY),
];

/// Where a provider-side failure happened before coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionErrorKind {
    Call,
    Decode,
}

impl ExtractionErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionErrorKind::Call => "call",
            ExtractionErrorKind::Decode => "decode",
        }
    }
}

/// Untyped model output. Missing fields are expected and get repaired with
/// `fill_missing_defaults`; the schema coercer decides whether it is usable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawExtraction(Map<String, Value>);

impl RawExtraction {
    /// Wraps a decoded object, renaming legacy keys when the current key is absent.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        for (legacy, current) in LEGACY_ALIASES {
            if map.contains_key(current) {
                continue;
            }
            if let Some(value) = map.remove(legacy) {
                map.insert(current.to_string(), value);
            }
        }
        Self(map)
    }

    /// Zero totals, empty buckets, VND.
    pub fn safe_default() -> Self {
        let mut raw = Self(Map::new());
        raw.fill_missing_defaults();
        raw
    }

    pub fn failed(kind: ExtractionErrorKind, message: impl Into<String>) -> Self {
        let mut raw = Self::safe_default();
        raw.0
            .insert(ERROR_KEY.to_string(), Value::String(message.into()));
        raw.0.insert(
            ERROR_KIND_KEY.to_string(),
            Value::String(kind.as_str().to_string()),
        );
        raw
    }

    pub fn with_raw_response(mut self, raw_response: impl Into<String>) -> Self {
        self.0.insert(
            RAW_RESPONSE_KEY.to_string(),
            Value::String(raw_response.into()),
        );
        self
    }

    pub fn fill_missing_defaults(&mut self) {
        let defaults = [
            (TOTAL_AMOUNT_KEY, json!({ "incomes": 0, "expenses": 0 })),
            (LINE_ITEMS_KEY, json!({ "incomes": [], "expenses": [] })),
            (CURRENCY_CODE_KEY, json!("VND")),
        ];
        for (key, default) in defaults {
            let missing = matches!(self.0.get(key), None | Some(Value::Null));
            if missing {
                self.0.insert(key.to_string(), default);
            }
        }
    }

    pub fn set_tokens_used(&mut self, tokens: u64) {
        self.0.insert(TOKENS_USED_KEY.to_string(), Value::from(tokens));
    }

    pub fn mark_truncated(&mut self) {
        self.0.insert(TRUNCATED_KEY.to_string(), Value::Bool(true));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn error(&self) -> Option<&str> {
        self.0.get(ERROR_KEY).and_then(Value::as_str)
    }

    pub fn error_kind(&self) -> Option<&str> {
        self.0.get(ERROR_KIND_KEY).and_then(Value::as_str)
    }

    pub fn raw_response(&self) -> Option<&str> {
        self.0.get(RAW_RESPONSE_KEY).and_then(Value::as_str)
    }

    pub fn is_truncated(&self) -> bool {
        self.0
            .get(TRUNCATED_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for RawExtraction {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_map(map)
    }
}
