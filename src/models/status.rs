//! Closed status/type enumerations.
//!
//! Upstream strings are normalised before matching (`"confirmed"` and
//! `"CONFIRMED"` are both `Confirmed`). A value outside the enumeration is
//! kept verbatim in `Other` so it can still be shown, never coerced into a
//! known variant. `null` or a non-string decodes to `Other` as well.

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient_string;

/// Capitalise the first character and lowercase the rest.
pub fn normalize_status(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
    Failed,
    Initialized,
    Other(String),
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Confirmed,
        BookingStatus::Pending,
        BookingStatus::Cancelled,
        BookingStatus::Failed,
        BookingStatus::Initialized,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Pending => "Pending",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Failed => "Failed",
            BookingStatus::Initialized => "Initialized",
            BookingStatus::Other(raw) => raw,
        }
    }

    /// Only canonical values; used for user-selected filters.
    pub fn parse(raw: &str) -> Option<Self> {
        match Self::from(raw.to_string()) {
            BookingStatus::Other(_) => None,
            known => Some(known),
        }
    }
}

impl From<String> for BookingStatus {
    fn from(raw: String) -> Self {
        match normalize_status(raw.trim()).as_str() {
            "Confirmed" => BookingStatus::Confirmed,
            "Pending" => BookingStatus::Pending,
            "Cancelled" => BookingStatus::Cancelled,
            "Failed" => BookingStatus::Failed,
            "Initialized" => BookingStatus::Initialized,
            _ => BookingStatus::Other(raw),
        }
    }
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_string(deserializer).map(Self::from)
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Missing status is unknown, not pending.
impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Other(String::new())
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum PaymentStatus {
    Success,
    Paid,
    Pending,
    Cancelled,
    Failed,
    Other(String),
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::Success,
        PaymentStatus::Paid,
        PaymentStatus::Pending,
        PaymentStatus::Cancelled,
        PaymentStatus::Failed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Success => "Success",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Cancelled => "Cancelled",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Other(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match Self::from(raw.to_string()) {
            PaymentStatus::Other(_) => None,
            known => Some(known),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(raw: String) -> Self {
        match normalize_status(raw.trim()).as_str() {
            "Success" => PaymentStatus::Success,
            "Paid" => PaymentStatus::Paid,
            "Pending" => PaymentStatus::Pending,
            "Cancelled" => PaymentStatus::Cancelled,
            "Failed" => PaymentStatus::Failed,
            _ => PaymentStatus::Other(raw),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_string(deserializer).map(Self::from)
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Other(String::new())
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking/payment category. Canonical form is lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum BookingType {
    Flight,
    Hotel,
    Other(String),
}

impl BookingType {
    pub fn as_str(&self) -> &str {
        match self {
            BookingType::Flight => "flight",
            BookingType::Hotel => "hotel",
            BookingType::Other(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match Self::from(raw.to_string()) {
            BookingType::Other(_) => None,
            known => Some(known),
        }
    }
}

impl From<String> for BookingType {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "flight" => BookingType::Flight,
            "hotel" => BookingType::Hotel,
            _ => BookingType::Other(raw),
        }
    }
}

impl<'de> Deserialize<'de> for BookingType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_string(deserializer).map(Self::from)
    }
}

impl From<BookingType> for String {
    fn from(kind: BookingType) -> Self {
        kind.as_str().to_string()
    }
}

impl Default for BookingType {
    fn default() -> Self {
        BookingType::Other(String::new())
    }
}

impl std::fmt::Display for BookingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_capitalizes() {
        assert_eq!(normalize_status("confirmed"), "Confirmed");
        assert_eq!(normalize_status("FAILED"), "Failed");
        assert_eq!(normalize_status(""), "");
    }

    #[test]
    fn statuses_deserialize_case_insensitively() {
        let status: BookingStatus = serde_json::from_value(json!("CANCELLED")).unwrap();
        assert_eq!(status, BookingStatus::Cancelled);
        let status: PaymentStatus = serde_json::from_value(json!("success")).unwrap();
        assert_eq!(status, PaymentStatus::Success);
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let status: BookingStatus = serde_json::from_value(json!("refunded")).unwrap();
        assert_eq!(status, BookingStatus::Other("refunded".to_string()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("refunded"));
    }

    #[test]
    fn null_and_non_string_statuses_fall_back() {
        let status: BookingStatus = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(status, BookingStatus::default());
        let status: PaymentStatus = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(status, PaymentStatus::Other("3".to_string()));
        let kind: BookingType = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(kind, BookingType::default());
    }

    #[test]
    fn parse_rejects_unknown_filters() {
        assert_eq!(BookingStatus::parse("pending"), Some(BookingStatus::Pending));
        assert_eq!(BookingStatus::parse("all"), None);
        assert_eq!(PaymentStatus::parse("PAID"), Some(PaymentStatus::Paid));
        assert_eq!(BookingType::parse("Hotel"), Some(BookingType::Hotel));
        assert_eq!(BookingType::parse("train"), None);
    }
}
