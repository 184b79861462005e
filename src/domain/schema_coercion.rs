use serde_json::{Map, Value};

use super::{
    CURRENCY_CODE_KEY, CurrencyCode, DEFAULT_QUANTITY, DISCOUNT_TOLERANCE, LINE_ITEMS_KEY,
    LineItem, LineItems, MAX_DESCRIPTION_LENGTH, RawExtraction, TOKENS_USED_KEY,
    TOTAL_AMOUNT_KEY, TotalAmount, ValidatedResult,
};

const AMOUNT_AFTER_DISCOUNT_KEY: &str = "amountAfterDiscount";
const LEGACY_AMOUNT_AFTER_DISCOUNT_KEY: &str = "amount_after_discount";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {reason}")]
pub struct SchemaValidationError {
    pub path: String,
    pub reason: String,
}

impl SchemaValidationError {
    fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Turns untyped model output into a typed result. Pure: the same input always
/// yields the same output and nothing is read besides `raw`.
pub fn coerce(raw: &RawExtraction) -> Result<ValidatedResult, SchemaValidationError> {
    let total_amount = coerce_total_amount(present(raw.get(TOTAL_AMOUNT_KEY)))?;
    let line_items = coerce_line_items(present(raw.get(LINE_ITEMS_KEY)))?;
    let currency_code = coerce_currency(present(raw.get(CURRENCY_CODE_KEY)));
    let tokens_used = coerce_tokens(present(raw.get(TOKENS_USED_KEY)))?;

    Ok(ValidatedResult {
        total_amount,
        line_items,
        currency_code,
        tokens_used,
    })
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn coerce_total_amount(value: Option<&Value>) -> Result<TotalAmount, SchemaValidationError> {
    let Some(value) = value else {
        return Ok(TotalAmount::default());
    };
    let object = expect_object(value, TOTAL_AMOUNT_KEY)?;
    Ok(TotalAmount {
        incomes: optional_amount(object, "incomes", TOTAL_AMOUNT_KEY)?.unwrap_or(0.0),
        expenses: optional_amount(object, "expenses", TOTAL_AMOUNT_KEY)?.unwrap_or(0.0),
    })
}

fn coerce_line_items(value: Option<&Value>) -> Result<LineItems, SchemaValidationError> {
    let Some(value) = value else {
        return Ok(LineItems::default());
    };
    let object = expect_object(value, LINE_ITEMS_KEY)?;
    Ok(LineItems {
        incomes: coerce_bucket(object, "incomes")?,
        expenses: coerce_bucket(object, "expenses")?,
    })
}

fn coerce_bucket(
    object: &Map<String, Value>,
    bucket: &str,
) -> Result<Vec<LineItem>, SchemaValidationError> {
    let path = format!("{LINE_ITEMS_KEY}.{bucket}");
    let Some(value) = present(object.get(bucket)) else {
        return Ok(Vec::new());
    };
    let Value::Array(entries) = value else {
        return Err(SchemaValidationError::new(path, "expected an array"));
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| coerce_line_item(entry, &format!("{path}[{index}]")))
        .collect()
}

fn coerce_line_item(value: &Value, path: &str) -> Result<LineItem, SchemaValidationError> {
    let object = expect_object(value, path)?;

    let (description_key, description) = match present(object.get("description")) {
        Some(value) => ("description", Some(value)),
        None => ("category", present(object.get("category"))),
    };
    let description_path = format!("{path}.{description_key}");
    let description = match description {
        Some(Value::String(text)) => text.trim().to_string(),
        Some(_) => {
            return Err(SchemaValidationError::new(
                description_path,
                "expected a string",
            ));
        }
        None => {
            return Err(SchemaValidationError::new(
                format!("{path}.description"),
                "is required",
            ));
        }
    };
    if description.is_empty() {
        return Err(SchemaValidationError::new(
            description_path,
            "must not be empty",
        ));
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(SchemaValidationError::new(
            description_path,
            format!("must be at most {MAX_DESCRIPTION_LENGTH} characters"),
        ));
    }

    let amount = optional_amount(object, "amount", path)?
        .ok_or_else(|| SchemaValidationError::new(format!("{path}.amount"), "is required"))?;
    let quantity = optional_amount(object, "quantity", path)?.unwrap_or(DEFAULT_QUANTITY);
    let (discount, amount_after_discount) = coerce_discount(object, amount, path)?;

    Ok(LineItem {
        description,
        amount,
        quantity,
        discount,
        amount_after_discount,
    })
}

/// Discount defaults to zero and the paid amount to `amount - discount`; when
/// both are given they must agree within `DISCOUNT_TOLERANCE`.
fn coerce_discount(
    object: &Map<String, Value>,
    amount: f64,
    path: &str,
) -> Result<(f64, f64), SchemaValidationError> {
    let discount = optional_amount(object, "discount", path)?.unwrap_or(0.0);
    let expected = amount - discount;
    if expected < -DISCOUNT_TOLERANCE {
        return Err(SchemaValidationError::new(
            format!("{path}.discount"),
            "must not exceed amount",
        ));
    }

    let after_key = if present(object.get(AMOUNT_AFTER_DISCOUNT_KEY)).is_some() {
        AMOUNT_AFTER_DISCOUNT_KEY
    } else {
        LEGACY_AMOUNT_AFTER_DISCOUNT_KEY
    };
    let Some(after) = optional_amount(object, after_key, path)? else {
        return Ok((discount, expected.max(0.0)));
    };
    if (after - expected).abs() > DISCOUNT_TOLERANCE {
        return Err(SchemaValidationError::new(
            format!("{path}.{after_key}"),
            "must equal amount - discount",
        ));
    }
    Ok((discount, after))
}

fn coerce_currency(value: Option<&Value>) -> CurrencyCode {
    match value {
        Some(Value::String(code)) => CurrencyCode::parse_or_default(code),
        _ => CurrencyCode::default(),
    }
}

fn coerce_tokens(value: Option<&Value>) -> Result<u64, SchemaValidationError> {
    let Some(value) = value else {
        return Ok(0);
    };
    if let Some(tokens) = value.as_u64() {
        return Ok(tokens);
    }
    match value.as_f64() {
        Some(tokens) if tokens >= 0.0 && tokens.is_finite() && tokens.fract() == 0.0 => {
            Ok(tokens as u64)
        }
        _ => Err(SchemaValidationError::new(
            TOKENS_USED_KEY,
            "expected a non-negative integer",
        )),
    }
}

fn expect_object<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a Map<String, Value>, SchemaValidationError> {
    value
        .as_object()
        .ok_or_else(|| SchemaValidationError::new(path, "expected an object"))
}

fn optional_amount(
    object: &Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<Option<f64>, SchemaValidationError> {
    match present(object.get(key)) {
        Some(value) => non_negative_number(value, &format!("{parent}.{key}")).map(Some),
        None => Ok(None),
    }
}

/// Accepts JSON numbers and numeric strings such as `"1,250,000"`.
fn non_negative_number(value: &Value, path: &str) -> Result<f64, SchemaValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let cleaned: String = text
                .trim()
                .chars()
                .filter(|c| *c != ',' && *c != '_')
                .collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    };

    match parsed {
        Some(number) if !number.is_finite() => {
            Err(SchemaValidationError::new(path, "must be a finite number"))
        }
        Some(number) if number < 0.0 => {
            Err(SchemaValidationError::new(path, "must not be negative"))
        }
        Some(number) => Ok(number.abs()),
        None => Err(SchemaValidationError::new(path, "expected a number")),
    }
}
