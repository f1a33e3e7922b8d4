use serde_json::json;

use crate::cli::utils::{output_json, print_bookings, print_metrics};
use crate::cli::{require_session, session_expired, OutputFormat};
use crate::models::Currency;
use crate::views::source::load_rates;
use crate::views::{DashboardController, DashboardState};

pub async fn show(server: &str, page: u32, currency: Currency, output_format: OutputFormat) -> anyhow::Result<()> {
    let session = require_session(server)?;
    let client = session.client().clone();

    let mut dashboard = DashboardController::new(client.clone());
    dashboard.set_page(page);
    dashboard.set_currency(currency);

    let (rates, _) = tokio::join!(load_rates(&client), dashboard.load());
    dashboard.set_rates(rates);

    let data = match dashboard.state() {
        DashboardState::Loaded(data) => data,
        DashboardState::Unauthorized => return Err(session_expired()),
        DashboardState::Errored(message) => return Err(anyhow::anyhow!("{}", message)),
        DashboardState::Idle | DashboardState::Loading => return Ok(()),
    };
    let metrics = data.metrics();
    let revenue = dashboard.display_revenue().unwrap_or(metrics.total_revenue);

    match output_format {
        OutputFormat::Json => output_json(&json!({
            "metrics": {
                "total_bookings": metrics.total_bookings,
                "successful_payments": metrics.successful_payments,
                "failed_payments": metrics.failed_payments,
                "total_revenue": revenue,
                "currency": currency.code(),
            },
            "bookings": data.bookings,
            "page": dashboard.page(),
            "total_pages": dashboard.total_pages(),
        })),
        OutputFormat::Text => {
            print_metrics(&metrics, revenue, currency);
            println!();
            let rows: Vec<_> = data.bookings.iter().collect();
            print_bookings(&rows, currency, |b| dashboard.display_amount(b));
            Ok(())
        }
    }
}
