/*
[INPUT]:  Signing context, operation path and optional form parameters
[OUTPUT]: Account data from private endpoints
[POS]:    HTTP layer - private endpoints (require Rest-Key/Rest-Sign)
[UPDATE]: When adding new private endpoints or changing the envelope check
*/

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::http::{MtGoxClient, MtGoxError, Result};
use crate::types::{ErrorResponse, RESULT_ERROR};

/// Operation path of the account info endpoint
pub const ACCOUNT_INFO: &str = "money/info";

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

impl MtGoxClient {
    /// Account information for the authenticated key
    ///
    /// POST BTC{currency}/money/info
    pub async fn get_account_info(&self) -> Result<Value> {
        let path = Self::pair_path(self.currency(), ACCOUNT_INFO);
        let response: Value = self.signed_post(&path, None).await?;
        ensure_success(&response)?;
        Ok(response)
    }

    /// Send a signed POST to a private endpoint
    ///
    /// `params` is an already form-encoded parameter string; the nonce is
    /// appended to it. Fails with [`MtGoxError::Unauthenticated`] without
    /// touching the network when the client has no credentials.
    pub async fn signed_post<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&str>,
    ) -> Result<T> {
        let signer = self.signer()?;
        let signed = signer.sign(path, params);
        debug!(path = %signed.path, nonce = signed.nonce, "sending signed request");

        let mut builder = self
            .request(Method::POST, &signed.path)?
            .header(CONTENT_TYPE, FORM_URLENCODED);
        for (name, value) in signed.headers() {
            builder = builder.header(name, value);
        }
        let builder = builder.body(signed.body.clone());

        self.send_json(builder).await
    }
}

/// Reject `{"result": "error", ...}` envelopes
fn ensure_success(response: &Value) -> Result<()> {
    if response.get("result").and_then(Value::as_str) != Some(RESULT_ERROR) {
        return Ok(());
    }

    let envelope = ErrorResponse::deserialize(response)
        .map_err(|err| MtGoxError::decode(err, response.to_string()))?;
    let message = if envelope.error.is_empty() {
        "unknown error".to_string()
    } else {
        envelope.error
    };

    Err(MtGoxError::Remote {
        message,
        token: envelope.token,
    })
}
