use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display currencies offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    NGN,
    USD,
    EUR,
    GBP,
}

impl Currency {
    pub const SUPPORTED: [Currency; 4] = [Currency::NGN, Currency::USD, Currency::EUR, Currency::GBP];

    pub fn code(self) -> &'static str {
        match self {
            Currency::NGN => "NGN",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::NGN => "₦",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Currency::SUPPORTED
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| format!("unsupported currency '{}'", s))
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Multipliers from `base` into each listed currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    pub base: String,
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

impl ExchangeRateTable {
    pub fn rate(&self, currency: Currency) -> Option<f64> {
        self.rates.get(currency.code()).copied()
    }
}
