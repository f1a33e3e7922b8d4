// handlers/exchange_rate.rs - GET /api/exchange-rate?base=CODE

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::HOME_CURRENCY;
use crate::error::RateApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RateQuery {
    pub base: Option<String>,
}

/// Unauthenticated; served from the hourly cache when possible.
pub async fn exchange_rate(
    State(state): State<AppState>,
    Query(query): Query<RateQuery>,
) -> Result<Json<Value>, RateApiError> {
    let base = query
        .base
        .map(|b| b.trim().to_uppercase())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| HOME_CURRENCY.to_string());

    let table = state.rates.latest(&base).await?;

    Ok(Json(json!({
        "status": true,
        "base": table.base,
        "rates": table.rates,
    })))
}
