//! # Error Types — Caller-Contract Faults
//!
//! Defines the fault-level error types shared across the workspace. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! These errors represent caller-contract violations (a body that cannot be
//! serialized, malformed key material) and fail loudly with full context.
//! Protocol-level verification failures are NOT errors — they are modeled as
//! the `VerificationResult` sum type in `reqsign-token`, because a malformed
//! or malicious token is an expected input, not a fault.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization of the request body failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic key or signature handling.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// A signature had the wrong shape to even attempt verification.
    #[error("malformed signature: expected 64 bytes, got {0}")]
    MalformedSignature(usize),
}

/// Error constructing a timestamp.
#[derive(Error, Debug)]
pub enum TimestampError {
    /// The unix timestamp is outside the representable range.
    #[error("invalid unix timestamp: {0}")]
    InvalidEpoch(i64),
}
