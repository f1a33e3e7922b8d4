#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use treepz_admin::config::AppConfig;
use treepz_admin::{app, AppState};

pub const ADMIN_EMAIL: &str = "ops@treepz.com";
pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const ADMIN_TOKEN: &str = "upstream-token-123";

/// The app on a free local port, with the upstream backend and the rate
/// provider both mocked.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub upstream: MockServer,
    pub rates: MockServer,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let upstream = MockServer::start().await;
        let rates = MockServer::start().await;

        let config = AppConfig::development()
            .with_upstream(&format!("{}/api/v1", upstream.uri()))
            .with_rate_provider(&format!("{}/latest", rates.uri()));
        let state = AppState::new(config)?;

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            port,
            base_url,
            upstream,
            rates,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upstream accepts the test admin and issues [`ADMIN_TOKEN`].
    pub async fn mock_sign_in(&self) {
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/sign-in"))
            .and(body_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "message": "Signed in",
                "data": { "token": ADMIN_TOKEN }
            })))
            .mount(&self.upstream)
            .await;
    }
}

/// Client with a cookie store, like a browser.
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client")
}

/// A browser that has already signed in.
pub async fn signed_in(server: &TestServer) -> Result<reqwest::Client> {
    server.mock_sign_in().await;
    let client = browser();
    let res = client
        .post(server.url("/api/admin/login"))
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed with {}", res.status());
    Ok(client)
}

pub fn bookings_body() -> Value {
    json!({
        "status": true,
        "data": {
            "bookings": [
                {
                    "id": "BK-100",
                    "user": "Ada Obi",
                    "flightIdentifier": "Air Peace P4 7121",
                    "status": "confirmed",
                    "type": "flight",
                    "totalAmount": "₦150,000",
                    "created": "2026-10-01T09:30:00Z"
                },
                {
                    "id": "BK-101",
                    "user": "Tunde Bello",
                    "flightIdentifier": "Arik W3 101",
                    "status": "Pending",
                    "type": "flight",
                    "totalAmount": 90000,
                    "created": "2026-10-02T11:00:00Z"
                }
            ],
            "pagination": { "total": 41 }
        }
    })
}

pub fn payments_body() -> Value {
    json!({
        "status": true,
        "data": {
            "payments": [
                {
                    "paymentId": "PAY-1", "bookingId": "BK-100", "user": "Ada Obi", "type": "flight",
                    "status": "SUCCESS", "amount": 150000, "method": "card", "provider": "PayStack",
                    "createdAt": "2026-10-01T09:31:00Z"
                },
                {
                    "paymentId": "PAY-2", "bookingId": "BK-101", "user": "Tunde Bello", "type": "flight",
                    "status": "failed", "amount": "90000", "method": "transfer", "provider": "Flutterwave",
                    "createdAt": "2026-10-02T11:05:00Z"
                }
            ],
            "pagination": { "total": 2 }
        }
    })
}

pub fn booking_detail_body(id: &str) -> Value {
    json!({
        "status": true,
        "message": "Booking retrieved",
        "data": {
            "bookingSummary": { "id": id, "type": "flight", "status": "Confirmed",
                "createdDate": "2026-10-01", "totalAmount": 150000, "currency": "NGN" },
            "userInfo": { "fullName": "Ada Obi", "email": "ada@example.com", "phoneNumber": "+2348000000000" },
            "flightInfo": { "airlineName": "Air Peace", "flightNumber": "P4 7121", "BookingType": "flight",
                "departureAirport": "LOS", "arrivalAirport": "ABV",
                "departureDateTime": "2026-10-20T07:00:00Z", "arrivalDateTime": "2026-10-20T08:10:00Z",
                "passengerCount": 1 },
            "paymentInfo": { "provider": "PayStack", "status": "Success", "amountPaid": 150000,
                "reference": "PSK-1", "failureReason": null }
        }
    })
}

pub fn rates_body() -> Value {
    json!({
        "base": "NGN",
        "rates": { "NGN": 1.0, "USD": 0.0012, "EUR": 0.0011, "GBP": 0.0005 }
    })
}
