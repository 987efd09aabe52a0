/*
[INPUT]:  Currency code and optional MTGOX_API_KEY / MTGOX_API_SECRET
[OUTPUT]: Ticker snapshot and, with credentials, account info
[POS]:    Examples - public and private API queries
[UPDATE]: When adding new endpoints
*/

use anyhow::{Context, Result, anyhow};
use mtgox_adapter::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info,mtgox_adapter=debug")?;

    let currency: Currency = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "USD".to_string())
        .parse()?;

    let credentials = match (
        std::env::var("MTGOX_API_KEY"),
        std::env::var("MTGOX_API_SECRET"),
    ) {
        (Ok(key), Ok(secret)) => Credentials::api_key(key, secret),
        _ => Credentials::Anonymous,
    };

    let client = MtGoxClient::new(currency, credentials).context("create client")?;

    let ticker = client.get_ticker_fast().await.context("fetch ticker")?;
    let last = &ticker.data.last;
    println!(
        "{currency}: last {} (exact {:?}) at {:?}",
        last.display,
        last.amount(),
        ticker.data.timestamp()
    );

    if client.is_authenticated() {
        let info = client.get_account_info().await.context("fetch account info")?;
        println!("{}", serde_json::to_string_pretty(&info)?);
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
