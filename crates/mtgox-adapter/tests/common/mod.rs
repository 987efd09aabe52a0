/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for mtgox-adapter tests

use mtgox_adapter::{ClientConfig, Credentials, Currency, MtGoxClient};
use wiremock::MockServer;

/// Base64 of `secret`
pub const TEST_SECRET: &str = "c2VjcmV0";
pub const TEST_KEY: &str = "key1";

/// Recorded `BTCUSD/money/ticker_fast` response
#[allow(dead_code)]
pub const TICKER_FAST_FIXTURE: &str = include_str!("../fixtures/ticker_fast.json");

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// API base served by the mock server
pub fn api_base(server: &MockServer) -> String {
    format!("{}/api/2/", server.uri())
}

/// Client pointed at the mock server
pub fn mock_client(server: &MockServer, credentials: Credentials) -> MtGoxClient {
    MtGoxClient::with_config_and_base_url(
        ClientConfig::default(),
        &api_base(server),
        Currency::Usd,
        credentials,
    )
    .expect("client init")
}

pub fn test_credentials() -> Credentials {
    Credentials::api_key(TEST_KEY, TEST_SECRET)
}
