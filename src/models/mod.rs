//! Transport records shared by the proxy, the client and the views.
//!
//! Nothing here is persisted; the upstream backend is the system of record.

pub mod amount;
pub mod booking;
pub mod currency;
pub mod payment;
pub mod status;

pub use booking::{
    Booking, BookingDetail, BookingDetailEnvelope, BookingSummary, BookingsEnvelope, FlightInfo, PaymentInfo,
    UserInfo,
};
pub use currency::{Currency, ExchangeRateTable};
pub use payment::{Payment, PaymentsEnvelope};
pub use status::{normalize_status, BookingStatus, BookingType, PaymentStatus};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One page of a filtered upstream collection.
///
/// `total` is the full filtered count upstream, independent of page size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// `pagination` block of the upstream list envelopes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Pagination {
    #[serde(deserialize_with = "lenient_count")]
    pub total: u64,
}

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Text field that tolerates `null` (empty) and scalars of the wrong type.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// As [`lenient_string`], keeping `null` as `None`.
pub(crate) fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?))
}

/// Non-negative count sent as a number or a numeric string. Anything else is zero.
pub(crate) fn lenient_count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + Default,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(count.and_then(|n| T::try_from(n).ok()).unwrap_or_default())
}

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pagination_total_accepts_numeric_strings() {
        let total = |value: Value| serde_json::from_value::<Pagination>(json!({ "total": value })).unwrap().total;
        assert_eq!(total(json!(41)), 41);
        assert_eq!(total(json!("41")), 41);
        assert_eq!(total(json!(41.0)), 41);
        assert_eq!(total(json!(null)), 0);
        assert_eq!(total(json!("many")), 0);
        assert_eq!(total(json!(-3)), 0);
    }
}
