//! Lenient numeric coercion.
//!
//! Every monetary, hour, and count field in this system follows one policy:
//! input that cannot be read as a number becomes `0`. Interactive edits,
//! document fields arriving over the wire, and CLI arguments all pass
//! through the helpers here, so a typo in a form field or a mangled JSON
//! value can never surface as `NaN`, an error, or a rejected document.

use rust_decimal::Decimal;

/// Normalizes input for decimal parsing: trims whitespace and removes commas
/// (thousands separator).
fn normalize(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`], coercing anything unparseable to zero.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`). Empty or
/// whitespace-only input is zero. Invalid input is logged and coerced to
/// zero rather than reported to the caller.
pub fn parse_or_zero(s: &str) -> Decimal {
    let normalized = normalize(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized.parse().unwrap_or_else(|e| {
        tracing::warn!(input = %s, "unparseable numeric input coerced to zero: {}", e);
        Decimal::ZERO
    })
}

/// Coerces an already-deserialized JSON value to a [`Decimal`].
///
/// Numbers are read through their shortest decimal rendering so that float
/// wire values like `0.28` arrive as exactly `0.28`. Strings go through
/// [`parse_or_zero`]. Everything else (null, bool, array, object) is zero.
pub(crate) fn coerce_json_number(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::Number(n) => n.to_string().parse().unwrap_or(Decimal::ZERO),
        serde_json::Value::String(s) => parse_or_zero(s),
        _ => Decimal::ZERO,
    }
}

/// Serde adapter for numeric document fields.
///
/// Deserializes any JSON value through the parse-or-zero policy and
/// serializes back as a plain JSON number, matching the wire shape the
/// persistence endpoint has always carried.
pub mod lenient {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(super::coerce_json_number(&value))
    }

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(value.to_f64().unwrap_or(0.0))
    }
}

/// Serde adapter for the optional save timestamp.
///
/// A missing, null, or unreadable timestamp is `None`; it never rejects a
/// document.
pub mod lenient_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }

    pub fn serialize<S>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}
