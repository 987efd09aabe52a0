/*
[INPUT]:  Error sources (configuration, signing, HTTP, API, decoding)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::SignerError;
use crate::types::ParseCurrencyError;

/// Main error type for the MtGox adapter
#[derive(Error, Debug)]
pub enum MtGoxError {
    /// Client could not be built from the supplied settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// HMAC signer could not be initialised
    #[error("Signer initialisation failed: {0}")]
    Signer(#[from] SignerError),

    /// Private endpoint called on a client without credentials
    #[error("Private API call requires credentials, client is unauthenticated")]
    Unauthenticated,

    /// Network or connection failure
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// API returned a non-success HTTP status
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// API answered with `"result": "error"`
    #[error("Remote error: {message}")]
    Remote {
        message: String,
        token: Option<String>,
    },

    /// Response body does not match the expected JSON shape
    #[error("Failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl MtGoxError {
    /// Check if the error was raised while building the client
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            MtGoxError::Config(_) | MtGoxError::Signer(_) | MtGoxError::UrlParse(_)
        )
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        match self {
            MtGoxError::Unauthenticated => true,
            MtGoxError::Api { code, .. } => *code == 401 || *code == 403,
            MtGoxError::Remote { token, .. } => token
                .as_deref()
                .is_some_and(|token| token.starts_with("login_error")),
            _ => false,
        }
    }

    /// Check if the error is retryable. The adapter itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            MtGoxError::Transport(_) => true,
            MtGoxError::Api { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        MtGoxError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }

    /// Create a decode error, keeping the offending body for diagnostics
    pub fn decode(source: serde_json::Error, body: impl Into<String>) -> Self {
        MtGoxError::Decode {
            source,
            body: body.into(),
        }
    }
}

impl From<ParseCurrencyError> for MtGoxError {
    fn from(err: ParseCurrencyError) -> Self {
        MtGoxError::Config(err.to_string())
    }
}

impl From<base64::DecodeError> for MtGoxError {
    fn from(err: base64::DecodeError) -> Self {
        MtGoxError::Config(format!("API secret is not valid base64: {err}"))
    }
}

/// Result type alias for MtGox operations
pub type Result<T> = std::result::Result<T, MtGoxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let server_err = MtGoxError::api_error(StatusCode::BAD_GATEWAY, "upstream");
        assert!(server_err.is_retryable());

        let rate_limited = MtGoxError::api_error(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(rate_limited.is_retryable());

        assert!(!MtGoxError::Unauthenticated.is_retryable());
        assert!(!MtGoxError::Config("bad".to_string()).is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(MtGoxError::Unauthenticated.is_auth_error());
        assert!(MtGoxError::api_error(StatusCode::FORBIDDEN, "no").is_auth_error());
        assert!(
            MtGoxError::Remote {
                message: "Invalid nonce".to_string(),
                token: Some("login_error_invalid_nonce".to_string()),
            }
            .is_auth_error()
        );
        assert!(!MtGoxError::api_error(StatusCode::BAD_REQUEST, "no").is_auth_error());
    }

    #[test]
    fn test_config_errors() {
        let signer_err = MtGoxError::from(SignerError::InvalidKey("secret is empty".to_string()));
        assert!(signer_err.is_config_error());

        let currency_err = MtGoxError::from(ParseCurrencyError("XYZ".to_string()));
        assert!(currency_err.is_config_error());
        assert_eq!(
            currency_err.to_string(),
            "Configuration error: Unsupported currency: XYZ"
        );

        assert!(!MtGoxError::Unauthenticated.is_config_error());
    }

    #[test]
    fn test_api_error_creation() {
        let err = MtGoxError::api_error(StatusCode::BAD_REQUEST, "Invalid currency");
        match err {
            MtGoxError::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "Invalid currency");
            }
            _ => panic!("Expected Api error variant"),
        }
    }

    #[test]
    fn test_decode_error_keeps_body() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        match MtGoxError::decode(source, "{oops") {
            MtGoxError::Decode { body, .. } => assert_eq!(body, "{oops"),
            _ => panic!("Expected Decode error variant"),
        }
    }
}
