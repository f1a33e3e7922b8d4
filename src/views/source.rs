//! Data seams between the controllers and the proxy client.

use async_trait::async_trait;

use crate::client::{ClientError, DashboardClient, ListQuery};
use crate::models::{Booking, BookingDetail, Currency, ExchangeRateTable, Page, Payment};

#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<T>, ClientError>;
}

#[async_trait]
pub trait DetailSource: Send + Sync {
    async fn fetch_detail(&self, booking_id: &str) -> Result<BookingDetail, ClientError>;
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self, base: Currency) -> Result<ExchangeRateTable, ClientError>;
}

#[async_trait]
impl PageSource<Booking> for DashboardClient {
    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Booking>, ClientError> {
        self.fetch_bookings(query).await
    }
}

#[async_trait]
impl PageSource<Payment> for DashboardClient {
    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Payment>, ClientError> {
        self.fetch_payments(query).await
    }
}

#[async_trait]
impl DetailSource for DashboardClient {
    async fn fetch_detail(&self, booking_id: &str) -> Result<BookingDetail, ClientError> {
        self.fetch_booking(booking_id).await
    }
}

#[async_trait]
impl RateSource for DashboardClient {
    async fn fetch_rates(&self, base: Currency) -> Result<ExchangeRateTable, ClientError> {
        self.fetch_exchange_rates(base).await
    }
}

/// Rates for display, or `None` when they cannot be loaded. Pages keep
/// rendering unconverted amounts in that case.
pub async fn load_rates<R: RateSource + ?Sized>(source: &R) -> Option<ExchangeRateTable> {
    match source.fetch_rates(Currency::NGN).await {
        Ok(table) => Some(table),
        Err(e) => {
            tracing::warn!("Exchange rate error: {}", e);
            None
        }
    }
}
