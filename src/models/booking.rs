use serde::{Deserialize, Serialize};

use super::status::{BookingStatus, BookingType, PaymentStatus};
use super::{amount, lenient_count, lenient_opt_string, lenient_string, null_as_default, Page, Pagination};

/// Row of the bookings list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Booking {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub user: String,
    #[serde(deserialize_with = "lenient_string")]
    pub flight_identifier: String,
    pub status: BookingStatus,
    #[serde(rename = "type")]
    pub kind: BookingType,
    #[serde(deserialize_with = "amount::deserialize")]
    pub total_amount: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub created: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_string")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_string")]
    pub currency: Option<String>,
}

/// `GET /api/bookings` body: `{ data: { bookings, pagination: { total } } }`.
///
/// Missing `data`, `bookings` or `total` decode as empty / zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookingsEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub data: BookingsData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookingsData {
    #[serde(deserialize_with = "null_as_default")]
    pub bookings: Vec<Booking>,
    #[serde(deserialize_with = "null_as_default")]
    pub pagination: Pagination,
}

impl From<BookingsEnvelope> for Page<Booking> {
    fn from(envelope: BookingsEnvelope) -> Self {
        Page {
            items: envelope.data.bookings,
            total: envelope.data.pagination.total,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingSummary {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BookingType,
    pub status: BookingStatus,
    #[serde(deserialize_with = "lenient_string")]
    pub created_date: String,
    #[serde(deserialize_with = "amount::deserialize")]
    pub total_amount: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlightInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub airline_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub flight_number: String,
    #[serde(rename = "BookingType")]
    pub booking_type: BookingType,
    #[serde(deserialize_with = "lenient_string")]
    pub departure_airport: String,
    #[serde(deserialize_with = "lenient_string")]
    pub arrival_airport: String,
    #[serde(deserialize_with = "lenient_string")]
    pub departure_date_time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub arrival_date_time: String,
    #[serde(deserialize_with = "lenient_count")]
    pub passenger_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub provider: String,
    pub status: PaymentStatus,
    #[serde(deserialize_with = "amount::deserialize")]
    pub amount_paid: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub reference: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub failure_reason: Option<String>,
}

/// Read-only composite assembled upstream for one booking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub booking_summary: BookingSummary,
    #[serde(deserialize_with = "null_as_default")]
    pub user_info: UserInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub flight_info: FlightInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_info: PaymentInfo,
}

/// `GET /api/bookings/{id}` body: `{ status, message, data }`.
///
/// Sections missing inside `data` decode as empty; a missing `data` means
/// there is no booking to show.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookingDetailEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub status: bool,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub message: Option<String>,
    pub data: Option<BookingDetail>,
}
