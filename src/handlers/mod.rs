// handlers/mod.rs - Proxy endpoints
//
// Public: login, logout, exchange rate.
// Session-gated: bookings list, booking detail, payments list.
//
// Every failure leaves as `{ "message": ... }` with a status from ApiError,
// so the browser side decodes all proxies the same way.

pub mod auth;
pub mod bookings;
pub mod exchange_rate;
pub mod payments;

use axum::{
    http::header,
    response::{IntoResponse, Json, Response},
};

use crate::upstream::Relayed;

/// Forward a successful upstream body as-is. List and detail answers must
/// always reflect current upstream state, so nothing may cache them.
pub(crate) fn relay(relayed: Relayed) -> Response {
    (
        relayed.status,
        [(header::CACHE_CONTROL, "no-store")],
        Json(relayed.body),
    )
        .into_response()
}
