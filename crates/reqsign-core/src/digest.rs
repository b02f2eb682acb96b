//! # Body Digest — Collision-Resistant Request-Body Binding
//!
//! Defines `BodyDigest`, the base64-encoded SHA-256 digest of a canonicalized
//! request body. The digest is embedded in token claims by the signer and
//! recomputed by the verifier; equality of the two strings binds the token to
//! the exact body that was signed.
//!
//! ## Security Invariant
//!
//! `BodyDigest::compute()` accepts only `&CanonicalBytes`, so every digest in
//! the system is taken over the canonical serialization. The digest is a
//! collision-resistant binding, not a MAC — no secret enters the hash.
//! Integrity comes from the outer asymmetric signature over the claims that
//! contain this digest.

use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// A base64-encoded SHA-256 digest of a canonicalized request body.
///
/// Produced exclusively from `CanonicalBytes` via [`BodyDigest::compute()`].
/// Serializes as a plain string so it embeds directly in token claims.
/// Comparison is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyDigest(String);

impl BodyDigest {
    /// Compute the SHA-256 digest of canonical bytes, base64-encoded.
    ///
    /// Deterministic and pure: the same canonical bytes always produce the
    /// same digest string. Uses the standard base64 alphabet with padding,
    /// yielding a fixed 44-character string for the 32-byte hash.
    pub fn compute(data: &CanonicalBytes) -> Self {
        let hash = Sha256::digest(data.as_bytes());
        Self(general_purpose::STANDARD.encode(hash))
    }

    /// Access the encoded digest string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BodyDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
