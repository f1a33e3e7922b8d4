//! Client for the upstream booking/payment backend.
//!
//! Every call except sign-in carries the admin session token as a bearer
//! credential. Responses are either relayed verbatim (success) or turned into
//! [`UpstreamError::Rejected`] carrying upstream's status and message.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::session::SessionToken;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream rejected the request with {status}: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream payload was not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),
}

/// Collection endpoints the proxy forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Bookings,
    Payments,
}

impl Resource {
    fn path(self) -> &'static str {
        match self {
            Resource::Bookings => "bookings",
            Resource::Payments => "payments",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Resource::Bookings => "Failed to fetch bookings",
            Resource::Payments => "Failed to fetch payments",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Upstream `auth/sign-in` envelope. Every field is optional upstream.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SignInEnvelope {
    status: bool,
    data: Option<SignInData>,
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SignInData {
    token: Option<String>,
}

#[derive(Debug)]
pub enum SignInOutcome {
    Accepted(SessionToken),
    Rejected(String),
}

/// A successful upstream answer, forwarded untouched.
#[derive(Debug, Clone)]
pub struct Relayed {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base: Url,
}

impl UpstreamClient {
    pub fn new(base_url: &str) -> Result<Self, UpstreamError> {
        let base = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(UpstreamError::Transport)?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// POST `auth/sign-in`. A response without `status: true` and a token is a rejection.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SignInOutcome, UpstreamError> {
        let url = self.base.join("auth/sign-in")?;
        tracing::debug!(email = %credentials.email, "forwarding sign-in upstream");

        let res = self
            .http
            .post(url)
            .json(credentials)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let envelope: SignInEnvelope = res.json().await.map_err(UpstreamError::Decode)?;

        match (envelope.status, envelope.data.and_then(|d| d.token)) {
            (true, Some(token)) if !token.is_empty() => Ok(SignInOutcome::Accepted(SessionToken::new(token))),
            _ => Ok(SignInOutcome::Rejected(
                envelope
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Invalid credentials".to_string()),
            )),
        }
    }

    /// GET a collection, forwarding the query parameters verbatim.
    pub async fn list(
        &self,
        resource: Resource,
        token: &SessionToken,
        query: &[(String, String)],
    ) -> Result<Relayed, UpstreamError> {
        let mut url = self.base.join(resource.path())?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        tracing::debug!(%url, "forwarding {} list upstream", resource.path());

        let res = self
            .http
            .get(url)
            .bearer_auth(token.expose())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            // Upstream may not send JSON on failure; fall back to the generic message
            let message = res
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| message_of(&body))
                .unwrap_or_else(|| resource.failure_message().to_string());
            return Err(UpstreamError::Rejected { status, message });
        }

        let body = res.json::<Value>().await.map_err(UpstreamError::Decode)?;
        Ok(Relayed { status, body })
    }

    /// GET `bookings/{id}`. The body must be JSON even when upstream fails.
    pub async fn booking(&self, token: &SessionToken, booking_id: &str) -> Result<Relayed, UpstreamError> {
        let mut url = self.base.join("bookings/")?;
        url.path_segments_mut()
            .map_err(|_| UpstreamError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(booking_id);
        tracing::debug!(%url, "forwarding booking detail upstream");

        let res = self
            .http
            .get(url)
            .bearer_auth(token.expose())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = res.status();
        let body = res.json::<Value>().await.map_err(UpstreamError::Decode)?;

        if !status.is_success() {
            let message = message_of(&body).unwrap_or_else(|| "Failed to fetch booking".to_string());
            return Err(UpstreamError::Rejected { status, message });
        }

        Ok(Relayed { status, body })
    }
}

fn message_of(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Collapse repeated keys the way a query-string `set` does: the first
/// position is kept and the last value wins.
pub fn dedupe_query(pairs: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        match out.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => out.push((key, value)),
        }
    }
    out
}
