//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices travel over the wire as formatted display strings
//! ("199.00 MAD", "$5.00"). [`parse_amount`] recovers the numeric value from
//! any such string; [`Price`] is the typed form used where the server owns
//! the number.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dirhams, not centimes).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display, e.g. "199.00 MAD" or "$5.00".
    #[must_use]
    pub fn display(&self) -> String {
        match self.currency_code {
            CurrencyCode::MAD => format!("{:.2} MAD", self.amount),
            code => format!("{}{:.2}", code.symbol(), self.amount),
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    MAD,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Currency symbol for prefix-formatted currencies.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::MAD => "",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MAD => "MAD",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

/// Extract the numeric amount from a formatted price string.
///
/// Strips every character that is not an ASCII digit or a decimal point
/// before parsing, so `"199.00 MAD"`, `"$5.00"` and `"1,299.50"` all parse.
/// Unparseable input (no digits at all) yields zero rather than an error:
/// a malformed display price must never poison a subtotal.
#[must_use]
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<Decimal>().unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_suffix_currency() {
        assert_eq!(parse_amount("19.99 MAD"), Decimal::new(1999, 2));
    }

    #[test]
    fn test_parse_amount_symbol_prefix() {
        assert_eq!(parse_amount("$5.00"), Decimal::new(500, 2));
        assert_eq!(parse_amount("€12.50"), Decimal::new(1250, 2));
    }

    #[test]
    fn test_parse_amount_thousands_separator() {
        assert_eq!(parse_amount("1,299.50"), Decimal::new(129_950, 2));
    }

    #[test]
    fn test_parse_amount_bare_number() {
        assert_eq!(parse_amount("42"), Decimal::new(42, 0));
    }

    #[test]
    fn test_parse_amount_garbage_is_zero() {
        assert_eq!(parse_amount("free!"), Decimal::ZERO);
        assert_eq!(parse_amount(""), Decimal::ZERO);
    }

    #[test]
    fn test_price_display() {
        let mad = Price::new(Decimal::new(19_900, 2), CurrencyCode::MAD);
        assert_eq!(mad.display(), "199.00 MAD");

        let usd = Price::new(Decimal::new(500, 2), CurrencyCode::USD);
        assert_eq!(usd.display(), "$5.00");
    }
}
