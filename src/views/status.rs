//! Status badge presentation.

use crate::models::{BookingStatus, PaymentStatus};

pub use crate::models::normalize_status;

/// Colour family of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Warning,
    Caution,
    Muted,
    Danger,
    /// Statuses outside the known set.
    Neutral,
}

impl BadgeTone {
    /// ANSI colour used by the terminal front-end.
    pub fn ansi(self) -> &'static str {
        match self {
            BadgeTone::Success => "\x1b[32m",
            BadgeTone::Warning => "\x1b[33m",
            BadgeTone::Caution => "\x1b[38;5;136m",
            BadgeTone::Muted => "\x1b[90m",
            BadgeTone::Danger => "\x1b[31m",
            BadgeTone::Neutral => "\x1b[0m",
        }
    }
}

pub fn booking_badge(status: &BookingStatus) -> BadgeTone {
    match status {
        BookingStatus::Confirmed => BadgeTone::Success,
        BookingStatus::Pending => BadgeTone::Warning,
        BookingStatus::Cancelled => BadgeTone::Muted,
        BookingStatus::Failed => BadgeTone::Danger,
        BookingStatus::Initialized => BadgeTone::Caution,
        BookingStatus::Other(_) => BadgeTone::Neutral,
    }
}

pub fn payment_badge(status: &PaymentStatus) -> BadgeTone {
    match status {
        PaymentStatus::Success | PaymentStatus::Paid => BadgeTone::Success,
        PaymentStatus::Pending => BadgeTone::Warning,
        PaymentStatus::Cancelled => BadgeTone::Muted,
        PaymentStatus::Failed => BadgeTone::Danger,
        PaymentStatus::Other(_) => BadgeTone::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_have_tones() {
        assert_eq!(booking_badge(&BookingStatus::Confirmed), BadgeTone::Success);
        assert_eq!(booking_badge(&BookingStatus::Failed), BadgeTone::Danger);
        assert_eq!(payment_badge(&PaymentStatus::Paid), BadgeTone::Success);
    }

    #[test]
    fn unknown_status_gets_neutral_tone() {
        let status = BookingStatus::from("refunded".to_string());
        assert_eq!(booking_badge(&status), BadgeTone::Neutral);
        let status = PaymentStatus::from("chargeback".to_string());
        assert_eq!(payment_badge(&status), BadgeTone::Neutral);
    }
}
