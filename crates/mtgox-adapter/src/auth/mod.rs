/*
[INPUT]:  Decoded API secrets and wall-clock time
[OUTPUT]: Keyed MACs and replay-safe nonces
[POS]:    Auth layer - cryptographic primitives behind request signing
[UPDATE]: When signing primitives or nonce policy change
*/

pub mod hmac_signer;
pub mod nonce;

pub use hmac_signer::{HmacAlgorithm, HmacSigner, SignerError};
pub use nonce::NonceGenerator;
