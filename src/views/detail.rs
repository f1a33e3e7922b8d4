//! Booking detail page.

use crate::models::BookingDetail;

use super::source::DetailSource;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Idle,
    Loading,
    Loaded(Box<BookingDetail>),
    Errored { message: String, unauthorized: bool },
}

pub struct BookingDetailController<S> {
    source: S,
    state: DetailState,
}

impl<S: DetailSource> BookingDetailController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: DetailState::Idle,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn detail(&self) -> Option<&BookingDetail> {
        match &self.state {
            DetailState::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    /// A blank id leaves the page idle without a request.
    pub async fn load(&mut self, booking_id: &str) -> &DetailState {
        let booking_id = booking_id.trim();
        if booking_id.is_empty() {
            self.state = DetailState::Idle;
            return &self.state;
        }

        self.state = DetailState::Loading;
        self.state = match self.source.fetch_detail(booking_id).await {
            Ok(detail) => DetailState::Loaded(Box::new(detail)),
            Err(e) => {
                tracing::warn!(booking_id, "booking detail failed: {}", e);
                DetailState::Errored {
                    message: e.to_string(),
                    unauthorized: e.is_unauthorized(),
                }
            }
        };
        &self.state
    }
}
