use serde_json::json;

use crate::cli::utils::{output_json, print_page_footer, print_payments};
use crate::cli::{require_session, session_expired, ListArgs, OutputFormat};
use crate::models::BookingType;
use crate::views::source::load_rates;
use crate::views::{LoadState, PaymentsController, PAYMENTS_PAGE_SIZE};

pub async fn list(server: &str, args: ListArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let session = require_session(server)?;
    let client = session.client().clone();

    // The type tab is local: flight shows every payment, hotel is not served yet
    let mut payments: PaymentsController<_> = PaymentsController::new(client.clone(), PAYMENTS_PAGE_SIZE)
        .with_kind(BookingType::Flight)
        .with_unavailable_kind(BookingType::Hotel)
        .with_tab_only_kind();
    if let Some(kind) = args.kind()? {
        payments.set_kind(Some(kind));
    }
    if let Some(status) = &args.status {
        payments.set_status_filter(status)?;
    }
    payments.set_date_filter(args.date.clone());
    if let Some(search) = &args.search {
        payments.commit_search(search);
    }
    payments.set_page(args.page);
    payments.set_currency(args.currency);

    let (rates, _) = tokio::join!(load_rates(&client), payments.refresh());
    payments.set_rates(rates);

    match payments.state() {
        LoadState::Errored { unauthorized: true, .. } => Err(session_expired()),
        LoadState::Errored { message, .. } => Err(anyhow::anyhow!("{}", message)),
        _ => {
            let rows = payments.visible_items();
            match output_format {
                OutputFormat::Json => output_json(&json!({
                    "payments": rows,
                    "page": payments.page(),
                    "total": payments.effective_total(),
                    "total_pages": payments.total_pages(),
                })),
                OutputFormat::Text => {
                    print_payments(&rows, payments.currency(), |p| payments.display_amount(p));
                    print_page_footer(payments.page(), payments.total_pages(), payments.effective_total());
                    Ok(())
                }
            }
        }
    }
}
