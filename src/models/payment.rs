use serde::{Deserialize, Serialize};

use super::status::{BookingType, PaymentStatus};
use super::{amount, lenient_opt_string, lenient_string, null_as_default, Page, Pagination};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Payment {
    #[serde(deserialize_with = "lenient_string")]
    pub payment_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub booking_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub user: String,
    #[serde(rename = "type")]
    pub kind: BookingType,
    pub status: PaymentStatus,
    #[serde(deserialize_with = "amount::deserialize")]
    pub amount: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub method: String,
    #[serde(deserialize_with = "lenient_string")]
    pub provider: String,
    #[serde(deserialize_with = "lenient_string")]
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_string")]
    pub currency: Option<String>,
}

/// `GET /api/payments` body: `{ data: { payments, pagination: { total } } }`.
///
/// Missing `data`, `payments` or `total` decode as empty / zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaymentsEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub data: PaymentsData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaymentsData {
    #[serde(deserialize_with = "null_as_default")]
    pub payments: Vec<Payment>,
    #[serde(deserialize_with = "null_as_default")]
    pub pagination: Pagination,
}

impl From<PaymentsEnvelope> for Page<Payment> {
    fn from(envelope: PaymentsEnvelope) -> Self {
        Page {
            items: envelope.data.payments,
            total: envelope.data.pagination.total,
        }
    }
}
