//! Upstream amounts arrive as numbers, numeric strings, or decorated strings
//! such as `"NGN 12,500.00"`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keep digits and dots, then parse. Anything unparseable is zero.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    cleaned.parse().unwrap_or(0.0)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_amount(&s),
        _ => 0.0,
    })
}
