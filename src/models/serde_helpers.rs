//! Lenient decoders for resolver payloads.
//!
//! The resolution service is third-party and loosely typed: numbers show up
//! where strings are expected and flags are not always booleans. These
//! helpers read a field of the wrong JSON type as absent instead of failing
//! the whole manifest.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings, or numbers and booleans rendered as strings
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Booleans only; anything else is absent
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        _ => None,
    })
}

/// A byte count given as a number or a numeric string.
///
/// Strings are read like `parseInt`: leading whitespace is skipped and the
/// leading run of digits is used. Negative or digit-less values are absent.
pub fn opt_byte_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Some(Value::String(s)) => leading_digits(&s),
        _ => None,
    })
}

fn leading_digits(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
