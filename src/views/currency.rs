//! Display-time currency conversion.
//!
//! Upstream amounts are in the home currency (NGN). Conversion never touches
//! the record; it only changes what is shown.

use crate::models::{Currency, ExchangeRateTable};

/// Amount in `currency`, or the unconverted amount when no usable rate is loaded.
pub fn convert(amount: f64, currency: Currency, rates: Option<&ExchangeRateTable>) -> f64 {
    if currency == Currency::NGN {
        return amount;
    }
    match rates.and_then(|table| table.rate(currency)) {
        // A zero rate is treated as missing
        Some(rate) if rate != 0.0 && !rate.is_nan() => amount * rate,
        _ => amount,
    }
}

/// `₦150,000.00`, `$120.00`, `-€3.50`.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!(
        "{}{}{}.{:02}",
        sign,
        currency.symbol(),
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
