//! Extension traits for attaching generated headers to outbound HTTP requests.

pub mod request_signer;

pub use request_signer::*;
