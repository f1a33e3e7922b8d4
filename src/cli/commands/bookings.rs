use serde_json::json;

use crate::cli::utils::{output_json, print_booking_detail, print_bookings, print_page_footer};
use crate::cli::{require_session, session_expired, ListArgs, OutputFormat};
use crate::views::source::load_rates;
use crate::views::{BookingDetailController, BookingsController, DetailState, LoadState, BOOKINGS_PAGE_SIZE};

pub async fn list(server: &str, args: ListArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let session = require_session(server)?;
    let client = session.client().clone();

    let mut bookings: BookingsController<_> = BookingsController::new(client.clone(), BOOKINGS_PAGE_SIZE);
    bookings.set_kind(args.kind()?);
    if let Some(status) = &args.status {
        bookings.set_status_filter(status)?;
    }
    bookings.set_date_filter(args.date.clone());
    if let Some(search) = &args.search {
        bookings.commit_search(search);
    }
    bookings.set_page(args.page);
    bookings.set_currency(args.currency);

    let (rates, _) = tokio::join!(load_rates(&client), bookings.refresh());
    bookings.set_rates(rates);

    match bookings.state() {
        LoadState::Errored { unauthorized: true, .. } => Err(session_expired()),
        LoadState::Errored { message, .. } => Err(anyhow::anyhow!("{}", message)),
        _ => {
            let rows = bookings.visible_items();
            match output_format {
                OutputFormat::Json => output_json(&json!({
                    "bookings": rows,
                    "page": bookings.page(),
                    "total": bookings.effective_total(),
                    "total_pages": bookings.total_pages(),
                })),
                OutputFormat::Text => {
                    print_bookings(&rows, bookings.currency(), |b| bookings.display_amount(b));
                    print_page_footer(bookings.page(), bookings.total_pages(), bookings.effective_total());
                    Ok(())
                }
            }
        }
    }
}

pub async fn detail(server: &str, id: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    if id.trim().is_empty() {
        anyhow::bail!("Invalid booking id format");
    }
    let session = require_session(server)?;
    let mut page = BookingDetailController::new(session.client().clone());

    match page.load(id).await {
        DetailState::Loaded(detail) => match output_format {
            OutputFormat::Json => output_json(detail),
            OutputFormat::Text => {
                print_booking_detail(detail);
                Ok(())
            }
        },
        DetailState::Errored { unauthorized: true, .. } => Err(session_expired()),
        DetailState::Errored { message, .. } => Err(anyhow::anyhow!("{}", message)),
        DetailState::Idle | DetailState::Loading => Err(anyhow::anyhow!("No booking found")),
    }
}
