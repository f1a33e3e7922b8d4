//! Client data access.
//!
//! Talks only to this service's proxy endpoints, never to the upstream
//! backend, so the session token stays inside the cookie jar. Every call
//! decodes through the explicit envelope types in [`crate::models`].

pub mod session;

pub use session::{SessionController, SessionState};

use std::sync::Arc;

use reqwest::{cookie::Jar, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use url::Url;

use crate::models::{
    Booking, BookingDetail, BookingDetailEnvelope, BookingType, BookingsEnvelope, Currency, ExchangeRateTable, Page,
    Payment, PaymentsEnvelope,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// 401 from a proxy; the caller should send the user back to login.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Failed(String),

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

/// Query forwarded to the list proxies. Unset filters are left out entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<BookingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 100,
            kind: None,
            status: None,
            date: None,
            search: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base: Url,
    jar: Arc<Jar>,
}

impl DashboardClient {
    /// `base_url` is where this service is reachable, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(ClientError::Network)?;
        Ok(Self { http, base, jar })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub(crate) fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let res = self
            .http
            .post(self.base.join("/api/admin/login")?)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(ClientError::Network)?;

        if !res.status().is_success() {
            return Err(ClientError::Failed(error_message(res, "Login failed").await));
        }
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let res = self
            .http
            .post(self.base.join("/api/admin/logout")?)
            .send()
            .await
            .map_err(ClientError::Network)?;

        if !res.status().is_success() {
            return Err(ClientError::Failed(error_message(res, "Logout failed").await));
        }
        Ok(())
    }

    pub async fn fetch_bookings(&self, query: &ListQuery) -> Result<Page<Booking>, ClientError> {
        let res = self.get("/api/bookings", Some(query)).await?;
        match res.status() {
            s if s.is_success() => {
                let envelope: BookingsEnvelope = res.json().await.map_err(ClientError::Decode)?;
                Ok(envelope.into())
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            _ => Err(ClientError::Failed("Failed to fetch bookings".to_string())),
        }
    }

    pub async fn fetch_payments(&self, query: &ListQuery) -> Result<Page<Payment>, ClientError> {
        let res = self.get("/api/payments", Some(query)).await?;
        match res.status() {
            s if s.is_success() => {
                let envelope: PaymentsEnvelope = res.json().await.map_err(ClientError::Decode)?;
                Ok(envelope.into())
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            _ => Err(ClientError::Failed("Failed to fetch payments".to_string())),
        }
    }

    /// Failures carry the proxy's own message when it sent one.
    pub async fn fetch_booking(&self, booking_id: &str) -> Result<BookingDetail, ClientError> {
        let mut url = self.base.join("/api/bookings/")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(booking_id);

        let res = self.http.get(url).send().await.map_err(ClientError::Network)?;
        match res.status() {
            s if s.is_success() => {
                let envelope: BookingDetailEnvelope = res.json().await.map_err(ClientError::Decode)?;
                envelope
                    .data
                    .ok_or_else(|| ClientError::Failed("No booking found".to_string()))
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            _ => Err(ClientError::Failed(
                error_message(res, "Failed to fetch booking by ID").await,
            )),
        }
    }

    pub async fn fetch_exchange_rates(&self, base: Currency) -> Result<ExchangeRateTable, ClientError> {
        let res = self
            .get("/api/exchange-rate", Some(&[("base", base.code())]))
            .await?;

        if !res.status().is_success() {
            return Err(ClientError::Failed("Failed to load exchange rates".to_string()));
        }
        res.json().await.map_err(ClientError::Decode)
    }

    async fn get<Q: Serialize + ?Sized>(&self, path: &str, query: Option<&Q>) -> Result<reqwest::Response, ClientError> {
        let mut req = self.http.get(self.base.join(path)?);
        if let Some(query) = query {
            req = req.query(query);
        }
        req.send().await.map_err(ClientError::Network)
    }
}

async fn error_message(res: reqwest::Response, fallback: &str) -> String {
    res.json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
