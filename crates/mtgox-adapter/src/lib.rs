/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public MtGox adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod config;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{HmacAlgorithm, HmacSigner, NonceGenerator, SignerError};

pub use config::AdapterConfig;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    Credentials,
    MtGoxClient,
    MtGoxClientBuilder,
    MtGoxError,
    RequestSigner,
    Result,
    SignedRequest,
};

// Re-export all types
pub use types::*;
