// handlers/payments.rs - GET /api/payments

use axum::{
    extract::{Query, State},
    response::Response,
};

use super::relay;
use crate::error::ApiError;
use crate::session::AdminSession;
use crate::state::AppState;
use crate::upstream::{dedupe_query, Resource};

pub async fn list_payments(
    State(state): State<AppState>,
    session: AdminSession,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let relayed = state
        .upstream
        .list(Resource::Payments, session.token(), &dedupe_query(params))
        .await?;
    Ok(relay(relayed))
}
