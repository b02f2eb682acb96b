//! # Token-Layer Errors
//!
//! Fault-level errors for the signing side and the token codec. These are
//! distinct from verification failures: a bad token presented to the
//! verifier is expected input and surfaces as a
//! [`VerificationResult`](crate::VerificationResult), never as one of these.

use reqsign_core::error::{CanonicalizationError, CryptoError};
use thiserror::Error;

/// Error from the compact token codec.
#[derive(Error, Debug)]
pub enum JwsError {
    /// The token does not parse as a compact signed structure.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// JSON serialization of header or claims failed.
    #[error("token serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The cryptographic verification step could not be attempted.
    #[error("verification could not be attempted: {0}")]
    Verification(#[from] CryptoError),
}

/// Error on the signing side.
///
/// Signing has no protocol-level failure modes; every variant here is a
/// caller-contract violation and should fail loudly.
#[derive(Error, Debug)]
pub enum SignError {
    /// The request body could not be canonicalized.
    #[error("body canonicalization failed: {0}")]
    Body(#[from] CanonicalizationError),

    /// Encoding the token failed.
    #[error("token encoding failed: {0}")]
    Token(#[from] JwsError),
}
