/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::{PricePoint, serde_helpers};

/// `result` value of a successful response envelope
pub const RESULT_SUCCESS: &str = "success";
/// `result` value of a failed response envelope
pub const RESULT_ERROR: &str = "error";

/// GET BTC{currency}/money/ticker_fast
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickerSnapshot {
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub data: TickerData,
}

impl TickerSnapshot {
    pub fn is_success(&self) -> bool {
        self.result == RESULT_SUCCESS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickerData {
    #[serde(default)]
    pub last_local: PricePoint,
    #[serde(default)]
    pub last: PricePoint,
    #[serde(default)]
    pub last_orig: PricePoint,
    #[serde(default)]
    pub last_all: PricePoint,
    #[serde(default)]
    pub buy: PricePoint,
    #[serde(default)]
    pub sell: PricePoint,
    /// Server time in microseconds since the UNIX epoch
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_u64_lenient",
        serialize_with = "serde_helpers::serialize_u64_as_str"
    )]
    pub now: u64,
}

impl TickerData {
    /// Server time as a UTC timestamp
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let micros = i64::try_from(self.now).ok()?;
        DateTime::from_timestamp_micros(micros)
    }
}

/// Envelope returned when the exchange rejects a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub result: String,
    #[serde(default)]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
