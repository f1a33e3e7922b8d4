use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::config::{ADMIN_PATH_PREFIX, LOGIN_PATH};
use crate::session::AdminSession;

/// True for every path in the admin section.
pub fn requires_session(path: &str) -> bool {
    path.starts_with(ADMIN_PATH_PREFIX)
}

/// Edge check for admin pages: the session cookie must exist.
///
/// Only presence is tested here. An expired or forged token still gets the
/// page, and the proxy endpoints answer 401 once the page asks for data.
pub async fn admin_guard(jar: CookieJar, request: Request, next: Next) -> Response {
    if requires_session(request.uri().path()) && AdminSession::from_jar(&jar).is_none() {
        tracing::debug!(path = %request.uri().path(), "no session cookie, redirecting to login");
        return Redirect::temporary(LOGIN_PATH).into_response();
    }

    next.run(request).await
}
