/*
[INPUT]:  Exchange currency table (codes, names, divisions)
[OUTPUT]: Typed Currency enum with fixed-point conversion
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the exchange lists or delists a currency
*/

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency code that is not traded against BTC
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported currency: {0}")]
pub struct ParseCurrencyError(pub String);

/// Currencies supported by the exchange
///
/// Amounts on the wire are integers in units of `1 / divisions()`; a
/// `value_int` of `69655509977` BTC is `696.55509977` BTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Btc,
    Usd,
    Gbp,
    Eur,
    Jpy,
    Aud,
    Cad,
    Chf,
    Cny,
    Dkk,
    Hkd,
    Pln,
    Rub,
    Sek,
    Sgd,
    Thb,
}

impl Currency {
    pub const ALL: [Currency; 16] = [
        Currency::Btc,
        Currency::Usd,
        Currency::Gbp,
        Currency::Eur,
        Currency::Jpy,
        Currency::Aud,
        Currency::Cad,
        Currency::Chf,
        Currency::Cny,
        Currency::Dkk,
        Currency::Hkd,
        Currency::Pln,
        Currency::Rub,
        Currency::Sek,
        Currency::Sgd,
        Currency::Thb,
    ];

    /// Three-letter code, e.g. `USD`
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Btc => "BTC",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
            Currency::Jpy => "JPY",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Dkk => "DKK",
            Currency::Hkd => "HKD",
            Currency::Pln => "PLN",
            Currency::Rub => "RUB",
            Currency::Sek => "SEK",
            Currency::Sgd => "SGD",
            Currency::Thb => "THB",
        }
    }

    /// Display name, e.g. `US Dollar`
    pub fn name(&self) -> &'static str {
        match self {
            Currency::Btc => "Bitcoin",
            Currency::Usd => "US Dollar",
            Currency::Gbp => "Great British Pound",
            Currency::Eur => "Euro",
            Currency::Jpy => "Japanese Yen",
            Currency::Aud => "Australian Dollar",
            Currency::Cad => "Canadian Dollar",
            Currency::Chf => "Swiss Franc",
            Currency::Cny => "Chinese Yuan",
            Currency::Dkk => "Danish Krone",
            Currency::Hkd => "Hong Kong Dollar",
            Currency::Pln => "Polish Zloty",
            Currency::Rub => "Russian Rouble",
            Currency::Sek => "Swedish Krona",
            Currency::Sgd => "Singapore Dollar",
            Currency::Thb => "Thai Baht",
        }
    }

    /// Number of decimal places carried by `value_int`
    pub fn scale(&self) -> u32 {
        match self {
            Currency::Btc => 8,
            Currency::Jpy | Currency::Sek => 3,
            _ => 5,
        }
    }

    /// Integer divisor for wire amounts, always `10^scale()`
    pub fn divisions(&self) -> u64 {
        10u64.pow(self.scale())
    }

    /// Convert an integer wire amount into its decimal value
    pub fn to_decimal(&self, value_int: i64) -> Decimal {
        Decimal::new(value_int, self.scale())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (name={}, divisions={})",
            self.code(),
            self.name(),
            self.divisions()
        )
    }
}

impl FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ParseCurrencyError(s.to_string()))
    }
}
