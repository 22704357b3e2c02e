//! Body Field Conversion
//!
//! Request bodies are converted to column types the way the store would
//! convert a literal: an integer column takes `10`, `10.0` and `"10"`, a date
//! column takes `"2000-01-01"` and `"2000-01-01T00:00:00.000Z"`, a text column
//! takes any scalar in its textual form.
//!
//! A value with no lossless conversion is kept as [`FieldValue::Raw`] and sent
//! as text. The store rejects it, which makes it an infrastructure error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::gateway::SqlValue;

/// A body value destined for a typed column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<T> {
    /// Converted to the column type
    Typed(T),
    /// Left as sent
    Raw(String),
}

impl<T> From<T> for FieldValue<T> {
    fn from(value: T) -> Self {
        FieldValue::Typed(value)
    }
}

impl From<Option<FieldValue<i32>>> for SqlValue {
    fn from(value: Option<FieldValue<i32>>) -> Self {
        match value {
            None => SqlValue::Integer(None),
            Some(FieldValue::Typed(v)) => SqlValue::Integer(Some(v)),
            Some(FieldValue::Raw(raw)) => SqlValue::Text(Some(raw)),
        }
    }
}

impl From<Option<FieldValue<NaiveDate>>> for SqlValue {
    fn from(value: Option<FieldValue<NaiveDate>>) -> Self {
        match value {
            None => SqlValue::Date(None),
            Some(FieldValue::Typed(v)) => SqlValue::Date(Some(v)),
            Some(FieldValue::Raw(raw)) => SqlValue::Text(Some(raw)),
        }
    }
}

/// Text column: strings as-is, other values in their JSON form.
///
/// ```rust
/// use serde::Deserialize;
/// use resources::domain::field;
///
/// #[derive(Deserialize)]
/// struct Body {
///     #[serde(default, deserialize_with = "field::text")]
///     name: Option<String>,
/// }
///
/// let body: Body = serde_json::from_str(r#"{"name": 123}"#).unwrap();
/// assert_eq!(body.name.as_deref(), Some("123"));
/// ```
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.map(raw_text))
}

/// Integer column: integers, floats without a fractional part and numeric
/// strings
pub fn integer<'de, D>(deserializer: D) -> Result<Option<FieldValue<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.map(|value| match to_integer(&value) {
        Some(v) => FieldValue::Typed(v),
        None => FieldValue::Raw(raw_text(value)),
    }))
}

/// Date column: `YYYY-MM-DD`, or a timestamp whose date part is kept
pub fn date<'de, D>(deserializer: D) -> Result<Option<FieldValue<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.map(|value| {
        let date = value.as_str().and_then(to_date);
        match date {
            Some(v) => FieldValue::Typed(v),
            None => FieldValue::Raw(raw_text(value)),
        }
    }))
}

fn raw_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn to_integer(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= f64::from(i32::MIN) && *f <= f64::from(i32::MAX))
                .map(|f| f as i32),
        },
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|t| t.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|t| t.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_forms() {
        assert_eq!(to_integer(&json!(10)), Some(10));
        assert_eq!(to_integer(&json!(10.0)), Some(10));
        assert_eq!(to_integer(&json!("10")), Some(10));
        assert_eq!(to_integer(&json!(" 7 ")), Some(7));
        assert_eq!(to_integer(&json!(-3)), Some(-3));
    }

    #[test]
    fn test_integer_without_lossless_conversion() {
        assert_eq!(to_integer(&json!(10.5)), None);
        assert_eq!(to_integer(&json!("dez")), None);
        assert_eq!(to_integer(&json!("10.0")), None);
        assert_eq!(to_integer(&json!(3_000_000_000_i64)), None);
        assert_eq!(to_integer(&json!(true)), None);
    }

    #[test]
    fn test_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2000, 1, 1);
        assert_eq!(to_date("2000-01-01"), expected);
        assert_eq!(to_date("2000-01-01T00:00:00.000Z"), expected);
        assert_eq!(to_date("2000-01-01T23:30:00-03:00"), expected);
        assert_eq!(to_date("2000-01-01T08:15:00"), expected);
        assert_eq!(to_date("01/01/2000"), None);
        assert_eq!(to_date("2000-02-30"), None);
    }

    #[test]
    fn test_raw_text_keeps_what_was_sent() {
        assert_eq!(raw_text(json!("dez")), "dez");
        assert_eq!(raw_text(json!(10.5)), "10.5");
        assert_eq!(raw_text(json!(true)), "true");
        assert_eq!(raw_text(json!(123)), "123");
    }

    #[test]
    fn test_unconverted_values_bind_as_text() {
        let value: SqlValue = Some(FieldValue::<i32>::Raw("dez".to_string())).into();
        assert_eq!(value, SqlValue::Text(Some("dez".to_string())));

        let value: SqlValue = Option::<FieldValue<NaiveDate>>::None.into();
        assert_eq!(value, SqlValue::Date(None));
    }
}
