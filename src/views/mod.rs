//! View controllers.
//!
//! Page-level state for the bookings list, payments list, dashboard and
//! booking detail screens, independent of how they are drawn. Controllers
//! talk to the proxies through the [`source`] traits, which the
//! [`DashboardClient`](crate::client::DashboardClient) implements.

pub mod currency;
pub mod dashboard;
pub mod debounce;
pub mod detail;
pub mod list;
pub mod pagination;
pub mod source;
pub mod status;

pub use currency::{convert, format_amount};
pub use dashboard::{DashboardController, DashboardMetrics, DashboardState};
pub use debounce::Debouncer;
pub use detail::{BookingDetailController, DetailState};
pub use list::{ListController, ListRow, LoadState, LoadTicket};
pub use pagination::total_pages;
pub use source::{DetailSource, PageSource, RateSource};
pub use status::{booking_badge, payment_badge, BadgeTone};

use chrono::{DateTime, NaiveDate};

use crate::models::{Booking, Payment};

/// Bookings list page size.
pub const BOOKINGS_PAGE_SIZE: u32 = 20;

/// Payments list page size.
pub const PAYMENTS_PAGE_SIZE: u32 = 20;

/// Bookings shown in the dashboard preview table.
pub const DASHBOARD_PREVIEW_SIZE: u32 = 5;

/// Payments fetched to compute dashboard metrics.
pub const DASHBOARD_PAYMENT_SAMPLE: u32 = 1000;

pub type BookingsController<S> = ListController<Booking, S>;
pub type PaymentsController<S> = ListController<Payment, S>;

/// Calendar date of an upstream timestamp, or the raw text when it does not parse.
pub fn display_date(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format("%d/%m/%Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}
