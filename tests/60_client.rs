mod common;

use anyhow::Result;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_TOKEN};
use treepz_admin::client::{ClientError, DashboardClient, ListQuery, SessionController};
use treepz_admin::models::{BookingStatus, BookingType, Currency, PaymentStatus};
use treepz_admin::session::SessionToken;
use treepz_admin::views::source::load_rates;
use treepz_admin::views::{
    BookingDetailController, BookingsController, DashboardController, DetailState, LoadState, BOOKINGS_PAGE_SIZE,
};

async fn mount_data(server: &common::TestServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::bookings_body()))
        .mount(&server.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::payments_body()))
        .mount(&server.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/bookings/BK-100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::booking_detail_body("BK-100")))
        .mount(&server.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/latest/NGN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::rates_body()))
        .mount(&server.rates)
        .await;
}

#[tokio::test]
async fn session_controller_holds_token_in_cookie_jar() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.mock_sign_in().await;

    let mut session = SessionController::new(DashboardClient::new(&server.base_url)?);
    assert!(session.current_token().is_none());

    session.login(ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    assert!(session.is_authenticated());
    assert_eq!(session.current_token(), Some(SessionToken::new(ADMIN_TOKEN)));

    session.logout().await?;
    assert!(!session.is_authenticated());
    assert!(session.current_token().is_none());

    // The server cleared the cookie too
    let err = session.client().fetch_bookings(&ListQuery::default()).await.unwrap_err();
    assert!(err.is_unauthorized());
    Ok(())
}

#[tokio::test]
async fn failed_login_surfaces_server_message() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/sign-in"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": false,
            "message": "Account locked"
        })))
        .mount(&server.upstream)
        .await;

    let mut session = SessionController::new(DashboardClient::new(&server.base_url)?);
    let err = session.login(ADMIN_EMAIL, "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Account locked");
    assert!(!session.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn client_decodes_envelopes() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    mount_data(&server).await;
    let client = DashboardClient::new(&server.base_url)?;
    SessionController::restore(client.clone(), &SessionToken::new(ADMIN_TOKEN));

    let bookings = client.fetch_bookings(&ListQuery::default()).await?;
    assert_eq!(bookings.total, 41);
    assert_eq!(bookings.items[0].status, BookingStatus::Confirmed);
    assert_eq!(bookings.items[0].total_amount, 150_000.0);
    assert_eq!(bookings.items[1].status, BookingStatus::Pending);

    let payments = client.fetch_payments(&ListQuery::default()).await?;
    assert_eq!(payments.items[0].status, PaymentStatus::Success);
    assert_eq!(payments.items[1].amount, 90_000.0);

    let detail = client.fetch_booking("BK-100").await?;
    assert_eq!(detail.user_info.full_name, "Ada Obi");
    assert_eq!(detail.payment_info.failure_reason, None);

    let rates = client.fetch_exchange_rates(Currency::NGN).await?;
    assert_eq!(rates.rate(Currency::USD), Some(0.0012));
    Ok(())
}

#[tokio::test]
async fn client_distinguishes_unauthorized_from_failure() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    Mock::given(method("GET"))
        .and(path_regex("^/api/v1/bookings/.+$"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Booking not found" })))
        .mount(&server.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/payments"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .mount(&server.upstream)
        .await;

    let anonymous = DashboardClient::new(&server.base_url)?;
    assert!(matches!(
        anonymous.fetch_bookings(&ListQuery::default()).await,
        Err(ClientError::Unauthorized)
    ));

    let client = DashboardClient::new(&server.base_url)?;
    SessionController::restore(client.clone(), &SessionToken::new(ADMIN_TOKEN));

    let err = client.fetch_booking("BK-404").await.unwrap_err();
    assert_eq!(err.to_string(), "Booking not found");

    // List failures use the fixed message, not the server's
    let err = client.fetch_payments(&ListQuery::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch payments");
    Ok(())
}

#[tokio::test]
async fn bookings_page_end_to_end() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    Mock::given(method("GET"))
        .and(path("/api/v1/bookings"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .and(query_param("search", "ada"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::bookings_body()))
        .expect(1)
        .mount(&server.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/latest/NGN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::rates_body()))
        .mount(&server.rates)
        .await;

    let client = DashboardClient::new(&server.base_url)?;
    SessionController::restore(client.clone(), &SessionToken::new(ADMIN_TOKEN));

    let mut page = BookingsController::new(client.clone(), BOOKINGS_PAGE_SIZE);
    page.commit_search("Ada");
    page.set_currency(Currency::USD);
    let (rates, _) = tokio::join!(load_rates(&client), page.refresh());
    page.set_rates(rates);

    assert!(matches!(page.state(), LoadState::Loaded(_)));
    let rows = page.visible_items();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "BK-100");
    assert_eq!(page.effective_total(), 1);
    assert_eq!(page.total_pages(), 1);
    assert!((page.display_amount(rows[0]) - 180.0).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn dashboard_and_detail_end_to_end() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    mount_data(&server).await;

    let client = DashboardClient::new(&server.base_url)?;
    SessionController::restore(client.clone(), &SessionToken::new(ADMIN_TOKEN));

    let mut dashboard = DashboardController::new(client.clone());
    dashboard.load().await;
    let metrics = dashboard.metrics().expect("loaded");
    assert_eq!(metrics.total_bookings, 41);
    assert_eq!(metrics.successful_payments, 1);
    assert_eq!(metrics.failed_payments, 1);
    assert_eq!(metrics.total_revenue, 150_000.0);

    assert!(dashboard.select_tab(BookingType::Hotel));
    dashboard.load().await;
    assert_eq!(dashboard.metrics().map(|m| m.total_bookings), Some(0));

    let mut detail = BookingDetailController::new(client);
    assert!(matches!(detail.load("BK-100").await, DetailState::Loaded(_)));
    assert_eq!(detail.detail().map(|d| d.flight_info.airline_name.as_str()), Some("Air Peace"));
    Ok(())
}

#[tokio::test]
async fn dashboard_unauthorized_asks_for_login() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let mut dashboard = DashboardController::new(DashboardClient::new(&server.base_url)?);
    dashboard.load().await;
    assert!(dashboard.needs_login());
    Ok(())
}

#[tokio::test]
async fn partially_shaped_page_still_loads() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    Mock::given(method("GET"))
        .and(path("/api/v1/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": {
                "bookings": [
                    { "id": "BK-200", "user": null, "status": null, "type": "flight",
                      "totalAmount": null, "created": null },
                    { "id": "BK-201", "user": "Ada Obi", "status": "confirmed", "type": "flight",
                      "totalAmount": 1000, "created": "2026-10-03T08:00:00Z" }
                ],
                "pagination": { "total": "41" }
            }
        })))
        .mount(&server.upstream)
        .await;

    let client = DashboardClient::new(&server.base_url)?;
    SessionController::restore(client.clone(), &SessionToken::new(ADMIN_TOKEN));

    let mut page = BookingsController::new(client, BOOKINGS_PAGE_SIZE);
    page.refresh().await;

    let LoadState::Loaded(loaded) = page.state() else {
        panic!("expected a loaded page, got {:?}", page.state());
    };
    assert_eq!(loaded.total, 41);
    assert_eq!(loaded.items[0].user, "");
    assert_eq!(loaded.items[0].status, BookingStatus::default());
    assert_eq!(loaded.items[1].status, BookingStatus::Confirmed);
    assert_eq!(page.total_pages(), 3);
    Ok(())
}
