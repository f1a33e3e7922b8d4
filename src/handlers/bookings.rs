// handlers/bookings.rs - GET /api/bookings, GET /api/bookings/:booking_id

use axum::{
    extract::{Path, Query, State},
    response::Response,
};

use super::relay;
use crate::error::ApiError;
use crate::session::AdminSession;
use crate::state::AppState;
use crate::upstream::{dedupe_query, Resource};

/// Forward the bookings query verbatim (page, limit, status, type, date, search, ...).
pub async fn list_bookings(
    State(state): State<AppState>,
    session: AdminSession,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let relayed = state
        .upstream
        .list(Resource::Bookings, session.token(), &dedupe_query(params))
        .await?;
    Ok(relay(relayed))
}

/// The id is checked before the session, and both before any upstream call.
pub async fn booking_detail(
    State(state): State<AppState>,
    session: Option<AdminSession>,
    booking_id: Option<Path<String>>,
) -> Result<Response, ApiError> {
    let booking_id = booking_id.map(|Path(id)| id).unwrap_or_default();
    if booking_id.trim().is_empty() {
        return Err(ApiError::bad_request("Invalid booking id format"));
    }

    let session = session.ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    let relayed = state.upstream.booking(session.token(), booking_id.trim()).await?;
    Ok(relay(relayed))
}
