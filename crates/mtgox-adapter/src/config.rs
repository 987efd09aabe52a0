/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed adapter configuration and a ready client
[POS]:    Configuration layer - client setup from disk
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::{ClientConfig, Credentials, MtGoxClient, MtGoxError, Result};
use crate::types::Currency;

/// Top-level adapter configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdapterConfig {
    /// Currency BTC is quoted against
    pub currency: Option<Currency>,
    /// API key from the exchange's security page
    #[serde(default)]
    pub api_key: Option<String>,
    /// API secret, still base64 encoded
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Override for the API base URL
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl AdapterConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MtGoxError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| MtGoxError::Config(format!("invalid adapter config: {e}")))
    }

    /// Credentials described by this configuration
    ///
    /// Key and secret must be given together.
    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Ok(Credentials::api_key(key, secret)),
            (None, None) => Ok(Credentials::Anonymous),
            (Some(_), None) => Err(MtGoxError::Config(
                "api_key is set but api_secret is missing".to_string(),
            )),
            (None, Some(_)) => Err(MtGoxError::Config(
                "api_secret is set but api_key is missing".to_string(),
            )),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            ..ClientConfig::default()
        }
    }

    /// Build a client from this configuration
    pub fn into_client(self) -> Result<MtGoxClient> {
        let credentials = self.credentials()?;
        let mut builder = MtGoxClient::builder()
            .config(self.client_config())
            .credentials(credentials);
        if let Some(currency) = self.currency {
            builder = builder.currency(currency);
        }
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }
}
