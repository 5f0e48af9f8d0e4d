//! Currency display formatting.
//!
//! The engine only needs "minor units in, display string out". Hosts can
//! plug in their own [`CurrencyFormatter`]; [`CurrencyStyle`] is the default,
//! rendering Brazilian reais (`R$ 1.234,50`) unless configured otherwise.
use serde::{Deserialize, Serialize};

use crate::money::MINOR_PER_MAJOR;

/// Turns a minor-unit amount into a display string.
pub trait CurrencyFormatter: Send + Sync {
    fn format(&self, minor_units: i64) -> String;
}

/// Symbol-and-separators formatter configured from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyStyle {
    #[serde(default = "CurrencyStyle::default_symbol")]
    pub symbol: String,
    #[serde(default = "CurrencyStyle::default_decimal_separator")]
    pub decimal_separator: char,
    #[serde(default = "CurrencyStyle::default_thousands_separator")]
    pub thousands_separator: char,
}

impl CurrencyStyle {
    fn default_symbol() -> String {
        String::from("R$")
    }

    const fn default_decimal_separator() -> char {
        ','
    }

    const fn default_thousands_separator() -> char {
        '.'
    }
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self {
            symbol: Self::default_symbol(),
            decimal_separator: Self::default_decimal_separator(),
            thousands_separator: Self::default_thousands_separator(),
        }
    }
}

impl CurrencyFormatter for CurrencyStyle {
    fn format(&self, minor_units: i64) -> String {
        let sign = if minor_units < 0 { "-" } else { "" };
        let magnitude = minor_units.unsigned_abs();
        let per_major = MINOR_PER_MAJOR.unsigned_abs();
        let major = group_thousands(magnitude / per_major, self.thousands_separator);
        let minor = magnitude % per_major;
        format!(
            "{sign}{symbol} {major}{separator}{minor:02}",
            symbol = self.symbol,
            separator = self.decimal_separator,
        )
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
