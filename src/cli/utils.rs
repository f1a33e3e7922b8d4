use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::models::{Booking, BookingDetail, Currency, Payment};
use crate::views::{booking_badge, display_date, format_amount, payment_badge, BadgeTone, DashboardMetrics};

const RESET: &str = "\x1b[0m";

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(body)) = (data, response.as_object_mut()) {
                body.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

pub fn output_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn badge(label: &str, tone: BadgeTone) -> String {
    format!("{}{}{}", tone.ansi(), label, RESET)
}

/// Bookings table. `amount` supplies the display-currency figure per row.
pub fn print_bookings<'a>(rows: &[&'a Booking], currency: Currency, amount: impl Fn(&'a Booking) -> f64) {
    if rows.is_empty() {
        println!("No bookings found");
        return;
    }

    println!(
        "{:<14} {:<22} {:<22} {:<12} {:<8} {:>16} {:<10}",
        "ID", "USER", "FLIGHT", "STATUS", "TYPE", "AMOUNT", "CREATED"
    );
    for &booking in rows {
        let status = booking.status.as_str();
        println!(
            "{:<14} {:<22} {:<22} {} {:<8} {:>16} {:<10}",
            truncate(&booking.id, 14),
            truncate(&booking.user, 22),
            truncate(&booking.flight_identifier, 22),
            badge(&format!("{:<12}", status), booking_badge(&booking.status)),
            booking.kind.as_str(),
            format_amount(amount(booking), currency),
            display_date(&booking.created),
        );
    }
}

pub fn print_payments<'a>(rows: &[&'a Payment], currency: Currency, amount: impl Fn(&'a Payment) -> f64) {
    if rows.is_empty() {
        println!("No payments found");
        return;
    }

    println!(
        "{:<14} {:<14} {:<22} {:<10} {:>16} {:<10} {:<10} {:<10}",
        "PAYMENT", "BOOKING", "USER", "STATUS", "AMOUNT", "METHOD", "PROVIDER", "DATE"
    );
    for &payment in rows {
        println!(
            "{:<14} {:<14} {:<22} {} {:>16} {:<10} {:<10} {:<10}",
            truncate(&payment.payment_id, 14),
            truncate(&payment.booking_id, 14),
            truncate(&payment.user, 22),
            badge(&format!("{:<10}", payment.status.as_str()), payment_badge(&payment.status)),
            format_amount(amount(payment), currency),
            truncate(&payment.method, 10),
            truncate(&payment.provider, 10),
            display_date(&payment.created_at),
        );
    }
}

pub fn print_page_footer(page: u32, total_pages: u64, total: u64) {
    println!();
    println!("Page {} of {} ({} total)", page, total_pages, total);
}

pub fn print_metrics(metrics: &DashboardMetrics, revenue: f64, currency: Currency) {
    println!("Total Bookings:       {}", metrics.total_bookings);
    println!("Successful Payments:  {}", metrics.successful_payments);
    println!("Failed Payments:      {}", metrics.failed_payments);
    println!("Total Revenue:        {}", format_amount(revenue, currency));
}

pub fn print_booking_detail(detail: &BookingDetail) {
    let summary = &detail.booking_summary;
    let currency: Currency = summary.currency.parse().unwrap_or_default();

    println!("Booking {}", summary.id);
    println!("  Status:     {}", badge(summary.status.as_str(), booking_badge(&summary.status)));
    println!("  Type:       {}", summary.kind);
    println!("  Created:    {}", display_date(&summary.created_date));
    println!("  Total:      {}", format_amount(summary.total_amount, currency));

    let user = &detail.user_info;
    println!();
    println!("Customer");
    println!("  Name:       {}", user.full_name);
    println!("  Email:      {}", user.email);
    println!("  Phone:      {}", user.phone_number);

    let flight = &detail.flight_info;
    println!();
    println!("Flight");
    println!("  Airline:    {} {}", flight.airline_name, flight.flight_number);
    println!("  Route:      {} → {}", flight.departure_airport, flight.arrival_airport);
    println!("  Departs:    {}", flight.departure_date_time);
    println!("  Arrives:    {}", flight.arrival_date_time);
    println!("  Passengers: {}", flight.passenger_count);

    let payment = &detail.payment_info;
    println!();
    println!("Payment");
    println!("  Provider:   {}", payment.provider);
    println!("  Status:     {}", badge(payment.status.as_str(), payment_badge(&payment.status)));
    println!("  Paid:       {}", format_amount(payment.amount_paid, currency));
    println!("  Reference:  {}", payment.reference);
    if let Some(reason) = payment.failure_reason.as_deref().filter(|r| !r.is_empty()) {
        println!("  Failure:    {}", reason);
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_cut_values() {
        assert_eq!(truncate("BK-1", 14), "BK-1");
        assert_eq!(truncate("Adaeze Nwosu-Okafor", 10), "Adaeze Nw…");
    }

    #[test]
    fn badge_resets_colour() {
        assert_eq!(badge("Failed", BadgeTone::Danger), "\x1b[31mFailed\x1b[0m");
    }
}
