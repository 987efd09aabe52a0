/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::Currency;

/// A single price quote as reported by the exchange
///
/// Fields keep their wire form, so equality is field-for-field: `"80"` and
/// `"80.00000"` are different quotes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PricePoint {
    /// Decimal amount as sent, e.g. `"97.97038"`
    #[serde(default, deserialize_with = "serde_helpers::deserialize_string_lenient")]
    pub value: String,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_i64_lenient",
        serialize_with = "serde_helpers::serialize_i64_as_str"
    )]
    pub value_int: i64,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub display_short: String,
    #[serde(default)]
    pub currency: String,
}

impl PricePoint {
    /// `value` parsed as a decimal
    pub fn decimal(&self) -> Option<Decimal> {
        Decimal::from_str(self.value.trim()).ok()
    }

    /// Quote currency, when it is one the exchange lists
    pub fn quote_currency(&self) -> Option<Currency> {
        self.currency.parse().ok()
    }

    /// Exact amount derived from `value_int` and the currency's divisions
    pub fn amount(&self) -> Option<Decimal> {
        self.quote_currency()
            .map(|currency| currency.to_decimal(self.value_int))
    }
}

pub(crate) mod serde_helpers {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    /// Strings are kept verbatim; bare numbers keep their JSON text
    pub fn deserialize_string_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(String::new()),
            Value::String(raw) => Ok(raw),
            Value::Number(number) => Ok(number.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "expected string, got {other}"
            ))),
        }
    }

    /// Integers arrive quoted (`"9797038"`) but bare numbers are accepted too
    pub fn deserialize_i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(0),
            Value::String(raw) if raw.trim().is_empty() => Ok(0),
            Value::String(raw) => raw.trim().parse().map_err(serde::de::Error::custom),
            Value::Number(number) => number
                .as_i64()
                .ok_or_else(|| serde::de::Error::custom(format!("integer out of range: {number}"))),
            other => Err(serde::de::Error::custom(format!(
                "expected integer, got {other}"
            ))),
        }
    }

    pub fn deserialize_u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(0),
            Value::String(raw) if raw.trim().is_empty() => Ok(0),
            Value::String(raw) => raw.trim().parse().map_err(serde::de::Error::custom),
            Value::Number(number) => number
                .as_u64()
                .ok_or_else(|| serde::de::Error::custom(format!("integer out of range: {number}"))),
            other => Err(serde::de::Error::custom(format!(
                "expected integer, got {other}"
            ))),
        }
    }

    pub fn serialize_i64_as_str<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn serialize_u64_as_str<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }
}
