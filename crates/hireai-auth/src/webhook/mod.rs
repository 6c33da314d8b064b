//! Inbound identity webhook authentication.

pub mod signature;

pub use signature::{SignatureRejection, SignatureVerifier, compute_signature};
