//! Deserializers that apply the library's defaulting rules at the boundary.
//!
//! Rows arrive either from the hosted database (typed, but nullable) or from
//! admin form controls (everything is a string, empty fields are common).
//! These helpers turn both into plain Rust values once, so the calculators
//! never need to care about missing or stringly-typed numbers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Integer field: numbers, numeric strings, null and missing all accepted.
pub fn int<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(int_from_value(&value))
}

/// Boolean field: null means false, "true"/"1" strings mean true.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim(), "true" | "TRUE" | "True" | "1"),
        _ => false,
    })
}

/// Free-text field where null means empty. Numbers are kept as their text,
/// since foreign keys such as `league_id` may be integers.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("expected text, found {}", other))),
    }
}

/// Identifier: the database hands out either integer keys or UUID strings.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected an id, found {}", other))),
    }
}

/// Optional identifier: null and empty strings mean no reference.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Null => Ok(None),
        other => Err(de::Error::custom(format!("expected an id, found {}", other))),
    }
}

/// Optional timestamp. Unparsable values are treated as missing.
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_timestamp))
}

pub fn int_from_value(value: &Value) -> i32 {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.clamp(i32::MIN as i64, i32::MAX as i64) as i32
            } else {
                // `as` saturates and maps NaN to 0
                n.as_f64().map(|f| f.trunc() as i32).unwrap_or(0)
            }
        }
        Value::String(s) => parse_leading_int(s).unwrap_or(0),
        _ => 0,
    }
}

/// Parse the leading integer of a string, the way a form control reads
/// "12", " 7 ", "-3" or "23b". Returns `None` when no digits lead.
pub fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    let signed = if negative { -magnitude } else { magnitude };
    Some(signed.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
}

pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Postgres renders timestamptz with a space separator
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
