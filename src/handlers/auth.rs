// handlers/auth.rs - POST /api/admin/login, POST /api/admin/logout

use axum::{body::Bytes, extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::session::{clear_session_cookie, session_cookie};
use crate::state::AppState;
use crate::upstream::{Credentials, SignInOutcome};

/// Sign in upstream and keep the token in the http-only session cookie.
///
/// The token itself never appears in the response body.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let credentials: Credentials =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request("Invalid request body"))?;

    match state.upstream.sign_in(&credentials).await? {
        SignInOutcome::Accepted(token) => {
            tracing::info!(email = %credentials.email, "admin signed in");
            let cookie = session_cookie(&token, state.config.security.secure_cookies);
            Ok((jar.add(cookie), Json(json!({ "success": true }))))
        }
        SignInOutcome::Rejected(message) => {
            tracing::warn!(email = %credentials.email, "admin sign-in rejected");
            Err(ApiError::unauthorized(message))
        }
    }
}

/// Drop the session cookie. Safe to call without a session.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let cookie = clear_session_cookie(state.config.security.secure_cookies);
    (jar.add(cookie), Json(json!({ "success": true })))
}
