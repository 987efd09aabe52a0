/*
[INPUT]:  Currency pair
[OUTPUT]: Market data (ticker snapshot)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use reqwest::Method;
use tracing::debug;

use crate::http::{MtGoxClient, Result};
use crate::types::{Currency, TickerSnapshot};

/// Operation path of the fast ticker
pub const TICKER_FAST: &str = "money/ticker_fast";

impl MtGoxClient {
    /// Most recent ticker for BTC against `currency`
    ///
    /// GET BTC{currency}/money/ticker_fast
    pub async fn get_ticker(&self, currency: Currency) -> Result<TickerSnapshot> {
        let path = Self::pair_path(currency, TICKER_FAST);
        debug!(%path, "requesting ticker");
        let builder = self.request(Method::GET, &path)?;
        self.send_json(builder).await
    }

    /// Most recent ticker for the client's own currency pair
    pub async fn get_ticker_fast(&self) -> Result<TickerSnapshot> {
        self.get_ticker(self.currency()).await
    }
}
