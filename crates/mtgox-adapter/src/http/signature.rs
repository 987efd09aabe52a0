/*
[INPUT]:  API key, base64 secret, request path and form body
[OUTPUT]: Signed request headers (Rest-Key, Rest-Sign) and nonce-bearing body
[POS]:    HTTP layer - request signing for private endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::auth::{HmacAlgorithm, HmacSigner, NonceGenerator};
use crate::http::{MtGoxError, Result};

/// Header carrying the raw API key
pub const REST_KEY_HEADER: &str = "Rest-Key";
/// Header carrying the base64 HMAC-SHA512 signature
pub const REST_SIGN_HEADER: &str = "Rest-Sign";

/// Append the nonce to a form-encoded body
///
/// `None` (or an empty body) yields `nonce=<n>`, otherwise `<body>&nonce=<n>`.
pub fn body_with_nonce(body: Option<&str>, nonce: u64) -> String {
    match body.filter(|body| !body.is_empty()) {
        Some(body) => format!("{body}&nonce={nonce}"),
        None => format!("nonce={nonce}"),
    }
}

/// Bytes covered by the signature: `path`, one NUL byte, then the body
pub fn canonical_message(path: &str, body_with_nonce: &str) -> Vec<u8> {
    let mut message = Vec::with_capacity(path.len() + 1 + body_with_nonce.len());
    message.extend_from_slice(path.as_bytes());
    message.push(0);
    message.extend_from_slice(body_with_nonce.as_bytes());
    message
}

/// A signed private request, built per call and dropped after dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Path relative to the API base, e.g. `BTCUSD/money/info`
    pub path: String,
    pub nonce: u64,
    /// Form body exactly as signed, nonce included
    pub body: String,
    pub rest_key: String,
    pub rest_sign: String,
}

impl SignedRequest {
    /// Header pairs to attach to the outbound POST
    pub fn headers(&self) -> [(&'static str, &str); 2] {
        [
            (REST_KEY_HEADER, self.rest_key.as_str()),
            (REST_SIGN_HEADER, self.rest_sign.as_str()),
        ]
    }
}

/// Signing context for private endpoints
///
/// Holds the API key, the decoded secret (keyed into an HMAC-SHA512 signer)
/// and the nonce generator. Nothing here changes after construction except
/// the nonce counter, which is atomic, so one signer may be shared freely
/// between tasks.
pub struct RequestSigner {
    api_key: String,
    hmac: HmacSigner,
    nonces: NonceGenerator,
}

impl RequestSigner {
    /// Build a signer from the API key and the base64 secret shown by the exchange
    pub fn new(api_key: impl Into<String>, secret_base64: &str) -> Result<Self> {
        Self::with_nonce_generator(api_key, secret_base64, NonceGenerator::new())
    }

    /// Build a signer with a caller-supplied nonce source
    pub fn with_nonce_generator(
        api_key: impl Into<String>,
        secret_base64: &str,
        nonces: NonceGenerator,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(MtGoxError::Config("API key is empty".to_string()));
        }

        let secret = BASE64.decode(secret_base64.trim())?;
        let hmac = HmacSigner::new(HmacAlgorithm::Sha512, &secret)?;

        Ok(Self {
            api_key,
            hmac,
            nonces,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Last nonce issued by this signer
    pub fn last_nonce(&self) -> u64 {
        self.nonces.last()
    }

    /// Sign `path` and `body` with a freshly issued nonce
    pub fn sign(&self, path: &str, body: Option<&str>) -> SignedRequest {
        let nonce = self.nonces.next();
        self.sign_with_nonce(path, body, nonce)
    }

    /// Sign `path` and `body` with an explicit nonce
    pub fn sign_with_nonce(&self, path: &str, body: Option<&str>, nonce: u64) -> SignedRequest {
        let body = body_with_nonce(body, nonce);
        let mac = self.hmac.sign(&canonical_message(path, &body));

        SignedRequest {
            path: path.to_string(),
            nonce,
            body,
            rest_key: self.api_key.clone(),
            rest_sign: BASE64.encode(mac),
        }
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("api_key", &self.api_key)
            .field("hmac", &self.hmac)
            .field("last_nonce", &self.nonces.last())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "c2VjcmV0";
    const PATH: &str = "BTCUSD/money/info";

    fn signer() -> RequestSigner {
        RequestSigner::new("key1", SECRET).unwrap()
    }

    #[test]
    fn test_body_with_nonce() {
        assert_eq!(body_with_nonce(None, 1000), "nonce=1000");
        assert_eq!(body_with_nonce(Some(""), 1000), "nonce=1000");
        assert_eq!(
            body_with_nonce(Some("currency=USD"), 1000),
            "currency=USD&nonce=1000"
        );
    }

    #[test]
    fn test_canonical_message_uses_nul_byte() {
        let message = canonical_message(PATH, "nonce=1000");
        let mut expected = b"BTCUSD/money/info".to_vec();
        expected.push(0x00);
        expected.extend_from_slice(b"nonce=1000");
        assert_eq!(message, expected);
        assert_eq!(message.iter().filter(|b| **b == 0).count(), 1);
    }

    #[test]
    fn test_known_signature_vector() {
        let signed = signer().sign_with_nonce(PATH, None, 1000);

        assert_eq!(signed.body, "nonce=1000");
        assert_eq!(signed.rest_key, "key1");
        assert_eq!(
            signed.rest_sign,
            "bVQL98L1Xx0CbU2wrNM8Xhfqnj5GfwAUl5n7M0GE1OorCi5382oIqT4CFRHsODwVSWbpPY9vij+n0Wng0IwkyQ=="
        );
    }

    #[test]
    fn test_known_signature_vector_with_body() {
        let signed = signer().sign_with_nonce(PATH, Some("currency=USD"), 1000);
        assert_eq!(signed.body, "currency=USD&nonce=1000");
        assert_eq!(
            signed.rest_sign,
            "YX79KVMXaM8cmdKa1vrmBtemkktmg4LuOggp6PUuEmBELR/7Dp6HgHZiZVT3IYaQ98HipFd5EW3Sxd6koDgymw=="
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = signer().sign_with_nonce(PATH, Some("a=1"), 42);
        let b = signer().sign_with_nonce(PATH, Some("a=1"), 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_any_input_change_changes_signature() {
        let base = signer().sign_with_nonce(PATH, Some("a=1"), 42).rest_sign;

        let other_path = signer().sign_with_nonce("BTCUSE/money/info", Some("a=1"), 42);
        let other_body = signer().sign_with_nonce(PATH, Some("a=2"), 42);
        let other_nonce = signer().sign_with_nonce(PATH, Some("a=1"), 43);
        let other_secret = RequestSigner::new("key1", "c2VjcmV1")
            .unwrap()
            .sign_with_nonce(PATH, Some("a=1"), 42);

        assert_ne!(base, other_path.rest_sign);
        assert_ne!(base, other_body.rest_sign);
        assert_ne!(base, other_nonce.rest_sign);
        assert_ne!(base, other_secret.rest_sign);
    }

    #[test]
    fn test_sign_issues_increasing_nonces() {
        let signer = RequestSigner::with_nonce_generator(
            "key1",
            SECRET,
            NonceGenerator::with_clock(|| 1000),
        )
        .unwrap();

        let first = signer.sign(PATH, None);
        let second = signer.sign(PATH, None);

        assert_eq!(first.nonce, 1000);
        assert_eq!(second.nonce, 1001);
        assert_eq!(second.body, "nonce=1001");
        assert_eq!(signer.last_nonce(), 1001);
        assert_eq!(
            first,
            signer.sign_with_nonce(PATH, None, 1000),
            "sign must match sign_with_nonce for the same nonce"
        );
    }

    #[test]
    fn test_headers() {
        let signed = signer().sign_with_nonce(PATH, None, 1000);
        let headers = signed.headers();
        assert_eq!(headers[0], (REST_KEY_HEADER, "key1"));
        assert_eq!(headers[1].0, REST_SIGN_HEADER);
        assert_eq!(BASE64.decode(headers[1].1).unwrap().len(), 64);
    }

    #[test]
    fn test_invalid_secret_is_config_error() {
        let err = RequestSigner::new("key1", "not base64!!").unwrap_err();
        assert!(matches!(err, MtGoxError::Config(_)));
    }

    #[test]
    fn test_empty_secret_is_invalid_key() {
        let err = RequestSigner::new("key1", "").unwrap_err();
        assert!(matches!(err, MtGoxError::Signer(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let err = RequestSigner::new("  ", SECRET).unwrap_err();
        assert!(matches!(err, MtGoxError::Config(_)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", signer());
        assert!(rendered.contains("key1"));
        assert!(!rendered.contains(SECRET));
        assert!(!rendered.contains("secret"));
    }
}
