//! The admin session, server side.
//!
//! The token lives in one http-only cookie. Handlers never read cookies
//! themselves: they take an [`AdminSession`] (or `Option<AdminSession>`) and
//! the extractor owns the lookup.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::config::{SESSION_COOKIE_NAME, SESSION_MAX_AGE_DAYS};
use crate::error::ApiError;

/// Opaque credential issued by the upstream sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Request-scoped session context, present only when the cookie is.
#[derive(Debug, Clone)]
pub struct AdminSession {
    token: SessionToken,
}

impl AdminSession {
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Presence-only lookup; validity is upstream's call.
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        jar.get(SESSION_COOKIE_NAME)
            .map(|c| c.value())
            .filter(|v| !v.is_empty())
            .map(|v| Self {
                token: SessionToken::new(v),
            })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        AdminSession::from_jar(&jar).ok_or_else(|| ApiError::unauthorized("Unauthorized"))
    }
}

/// Session cookie set after a successful login.
pub fn session_cookie(token: &SessionToken, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token.expose().to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
        .build()
}

/// Removal cookie for logout.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    fn jar_with(cookie: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie(&SessionToken::new("tok"), true);
        assert_eq!(cookie.name(), "treepz_admin_token");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(7)));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(false);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }

    #[test]
    fn session_found_only_when_cookie_present() {
        assert!(AdminSession::from_jar(&jar_with("treepz_admin_token=abc")).is_some());
        assert!(AdminSession::from_jar(&jar_with("other=abc")).is_none());
        assert!(AdminSession::from_jar(&jar_with("treepz_admin_token=")).is_none());
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("secret");
        assert_eq!(format!("{:?}", token), "SessionToken(***)");
    }
}
