/*
[INPUT]:  HTTP configuration (base URL, timeouts), currency pair, credentials
[OUTPUT]: Configured client ready for public and private API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::fmt;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::http::{MtGoxError, RequestSigner, Result};
use crate::types::Currency;

/// Base URL for the v2 API
pub const BASE_URL: &str = "https://data.mtgox.com/api/2/";

const JSON_MEDIA_TYPE: &str = "application/json";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("mtgox-adapter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Credentials used to build the signing context
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    /// Public endpoints only
    #[default]
    Anonymous,
    /// API key and its base64-encoded secret
    ApiKey { key: String, secret: String },
}

impl Credentials {
    pub fn api_key(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Credentials::ApiKey {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Anonymous => f.write_str("Anonymous"),
            Credentials::ApiKey { key, .. } => f
                .debug_struct("ApiKey")
                .field("key", key)
                .field("secret", &"<redacted>")
                .finish(),
        }
    }
}

/// Builder for [`MtGoxClient`]
#[derive(Debug, Default)]
pub struct MtGoxClientBuilder {
    currency: Option<Currency>,
    credentials: Credentials,
    config: ClientConfig,
    base_url: Option<String>,
    http_client: Option<Client>,
}

impl MtGoxClientBuilder {
    /// Currency BTC is quoted against (required)
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the API base, e.g. for a mock server
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use a preconfigured transport instead of building one from [`ClientConfig`]
    pub fn http_client(mut self, http_client: Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Validate settings and build the client
    ///
    /// Fails before any network activity when the currency is missing, the
    /// base URL is malformed, or the credentials cannot be turned into a
    /// signing context.
    pub fn build(self) -> Result<MtGoxClient> {
        let currency = self
            .currency
            .ok_or_else(|| MtGoxError::Config("currency is required".to_string()))?;

        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(BASE_URL))?;

        let signer = match self.credentials {
            Credentials::Anonymous => None,
            Credentials::ApiKey { key, secret } => Some(RequestSigner::new(key, &secret)?),
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => build_http_client(&self.config)?,
        };

        debug!(
            currency = currency.code(),
            base_url = %base_url,
            authenticated = signer.is_some(),
            "mtgox client created"
        );

        Ok(MtGoxClient {
            http_client,
            base_url,
            currency,
            signer,
        })
    }
}

/// Main HTTP client for the MtGox v2 API
#[derive(Debug)]
pub struct MtGoxClient {
    http_client: Client,
    base_url: Url,
    currency: Currency,
    signer: Option<RequestSigner>,
}

impl MtGoxClient {
    /// Create a new client with default configuration
    pub fn new(currency: Currency, credentials: Credentials) -> Result<Self> {
        Self::with_config(ClientConfig::default(), currency, credentials)
    }

    /// Create a new client with custom configuration
    pub fn with_config(
        config: ClientConfig,
        currency: Currency,
        credentials: Credentials,
    ) -> Result<Self> {
        Self::builder()
            .config(config)
            .currency(currency)
            .credentials(credentials)
            .build()
    }

    /// Create a new client against a custom API base
    pub fn with_config_and_base_url(
        config: ClientConfig,
        base_url: &str,
        currency: Currency,
        credentials: Credentials,
    ) -> Result<Self> {
        Self::builder()
            .config(config)
            .base_url(base_url)
            .currency(currency)
            .credentials(credentials)
            .build()
    }

    pub fn builder() -> MtGoxClientBuilder {
        MtGoxClientBuilder::default()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether private endpoints can be called
    pub fn is_authenticated(&self) -> bool {
        self.signer.is_some()
    }

    pub(crate) fn signer(&self) -> Result<&RequestSigner> {
        self.signer.as_ref().ok_or(MtGoxError::Unauthenticated)
    }

    /// Path of an operation on a BTC currency pair, e.g. `BTCUSD/money/info`
    pub fn pair_path(currency: Currency, operation: &str) -> String {
        format!("BTC{}/{}", currency.code(), operation.trim_start_matches('/'))
    }

    /// Build full URL for a path relative to the API base
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Build request builder for a path relative to the API base
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        Ok(self
            .http_client
            .request(method, url)
            .header(ACCEPT, JSON_MEDIA_TYPE))
    }

    /// Send a request and decode its JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await?;

        debug!(%url, status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "request rejected");
            return Err(MtGoxError::api_error(status, body));
        }

        serde_json::from_str(&body).map_err(|err| {
            warn!(%url, error = %err, "response body does not match expected shape");
            MtGoxError::decode(err, body)
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut base_url = Url::parse(raw)?;
    if base_url.cannot_be_a_base() {
        return Err(MtGoxError::Config(format!("base URL cannot be a base: {raw}")));
    }
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    Ok(base_url)
}

fn build_http_client(config: &ClientConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|err| MtGoxError::Config(format!("failed to build HTTP client: {err}")))
}
