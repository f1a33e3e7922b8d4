//! Dashboard landing page: booking preview plus payment metrics.

use crate::client::ListQuery;
use crate::models::{Booking, BookingType, Currency, ExchangeRateTable, Payment, PaymentStatus};

use super::currency::convert;
use super::pagination::total_pages;
use super::source::PageSource;
use super::{DASHBOARD_PAYMENT_SAMPLE, DASHBOARD_PREVIEW_SIZE};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub bookings: Vec<Booking>,
    pub total_bookings: u64,
    pub payments: Vec<Payment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Idle,
    Loading,
    Loaded(DashboardData),
    Errored(String),
    /// The session is gone; the caller should return to login.
    Unauthorized,
}

/// Figures for the metric cards. Revenue is in the home currency.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardMetrics {
    pub total_bookings: u64,
    pub successful_payments: usize,
    pub failed_payments: usize,
    pub total_revenue: f64,
}

impl DashboardData {
    pub fn metrics(&self) -> DashboardMetrics {
        let successful = self.payments.iter().filter(|p| p.status == PaymentStatus::Success);
        DashboardMetrics {
            total_bookings: self.total_bookings,
            successful_payments: successful.clone().count(),
            failed_payments: self
                .payments
                .iter()
                .filter(|p| p.status == PaymentStatus::Failed)
                .count(),
            total_revenue: successful.map(|p| p.amount).sum(),
        }
    }
}

pub struct DashboardController<S> {
    source: S,
    page: u32,
    kind: BookingType,
    currency: Currency,
    rates: Option<ExchangeRateTable>,
    state: DashboardState,
}

impl<S> DashboardController<S>
where
    S: PageSource<Booking> + PageSource<Payment>,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            page: 1,
            kind: BookingType::Flight,
            currency: Currency::NGN,
            rates: None,
            state: DashboardState::Idle,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn kind(&self) -> &BookingType {
        &self.kind
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// Switch the preview tab. Returns to the first page.
    pub fn select_tab(&mut self, kind: BookingType) -> bool {
        if self.kind == kind {
            return false;
        }
        self.kind = kind;
        self.page = 1;
        true
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    pub fn set_rates(&mut self, rates: Option<ExchangeRateTable>) {
        self.rates = rates;
    }

    /// Load the booking preview and the payment sample in parallel.
    ///
    /// Hotel bookings are not served yet: that tab shows an empty preview
    /// without a request and keeps the last payment sample.
    pub async fn load(&mut self) -> &DashboardState {
        if self.kind == BookingType::Hotel {
            let payments = match &self.state {
                DashboardState::Loaded(data) => data.payments.clone(),
                _ => Vec::new(),
            };
            self.state = DashboardState::Loaded(DashboardData {
                payments,
                ..DashboardData::default()
            });
            return &self.state;
        }

        self.state = DashboardState::Loading;

        let bookings_query = ListQuery {
            page: self.page,
            limit: DASHBOARD_PREVIEW_SIZE,
            kind: Some(BookingType::Flight),
            ..ListQuery::default()
        };
        let payments_query = ListQuery {
            page: 1,
            limit: DASHBOARD_PAYMENT_SAMPLE,
            ..ListQuery::default()
        };

        let (bookings, payments) = tokio::join!(
            <S as PageSource<Booking>>::fetch_page(&self.source, &bookings_query),
            <S as PageSource<Payment>>::fetch_page(&self.source, &payments_query),
        );

        self.state = match (bookings, payments) {
            (Ok(mut bookings), Ok(payments)) => {
                bookings.items.truncate(DASHBOARD_PREVIEW_SIZE as usize);
                DashboardState::Loaded(DashboardData {
                    bookings: bookings.items,
                    total_bookings: bookings.total,
                    payments: payments.items,
                })
            }
            (Err(e), _) | (_, Err(e)) if e.is_unauthorized() => DashboardState::Unauthorized,
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Dashboard fetch error: {}", e);
                DashboardState::Errored(e.to_string())
            }
        };
        &self.state
    }

    pub fn needs_login(&self) -> bool {
        self.state == DashboardState::Unauthorized
    }

    pub fn metrics(&self) -> Option<DashboardMetrics> {
        match &self.state {
            DashboardState::Loaded(data) => Some(data.metrics()),
            _ => None,
        }
    }

    /// Total revenue in the selected display currency.
    pub fn display_revenue(&self) -> Option<f64> {
        self.metrics()
            .map(|m| convert(m.total_revenue, self.currency, self.rates.as_ref()))
    }

    pub fn display_amount(&self, booking: &Booking) -> f64 {
        convert(booking.total_amount, self.currency, self.rates.as_ref())
    }

    pub fn total_pages(&self) -> u64 {
        let total = self.metrics().map(|m| m.total_bookings).unwrap_or(0);
        total_pages(total, DASHBOARD_PREVIEW_SIZE)
    }
}
