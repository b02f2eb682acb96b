//! # Signer — Token Construction
//!
//! Builds the claims set for a request and produces the compact signed token.
//! The signer borrows the caller's private key for the duration of each call;
//! key generation, storage, and rotation are entirely the caller's concern.

use chrono::Duration;
use reqsign_core::{BodyDigest, CanonicalBytes, Timestamp};
use reqsign_crypto::Ed25519KeyPair;
use serde::Serialize;

use crate::claims::Claims;
use crate::error::SignError;
use crate::jws::{self, Header, SignedToken};

/// Default validity window when the caller omits an explicit expiry.
///
/// A usability default, not a security parameter: callers performing real
/// request signing should pass an explicit window of seconds matching the
/// expected network round-trip.
pub const DEFAULT_VALIDITY_SECS: i64 = 60;

/// Signs requests with a borrowed private key.
///
/// Pure and stateless: each call operates solely on its arguments, so a
/// `Signer` is safely usable from concurrent tasks.
#[derive(Debug)]
pub struct Signer<'a> {
    key: &'a Ed25519KeyPair,
    default_validity: Duration,
}

impl<'a> Signer<'a> {
    /// Create a signer with the default validity window of
    /// [`DEFAULT_VALIDITY_SECS`].
    pub fn new(key: &'a Ed25519KeyPair) -> Self {
        Self {
            key,
            default_validity: Duration::seconds(DEFAULT_VALIDITY_SECS),
        }
    }

    /// Override the validity window applied when `expires_at` is omitted.
    ///
    /// The window is explicit configuration rather than ambient time
    /// arithmetic, so signing behavior is fully determined by arguments.
    pub fn with_default_validity(mut self, validity: Duration) -> Self {
        self.default_validity = validity;
        self
    }

    /// Sign a request, producing a compact token binding its URI, body
    /// digest, and validity window.
    ///
    /// `expires_at` defaults to `issued_at` plus the configured validity
    /// window.
    ///
    /// # Errors
    ///
    /// Only on caller-contract violations: a body that cannot be serialized
    /// to JSON. There is no protocol-level failure path on the signing side.
    pub fn sign(
        &self,
        body: &impl Serialize,
        uri: &str,
        issued_at: Timestamp,
        expires_at: Option<Timestamp>,
    ) -> Result<SignedToken, SignError> {
        let expires_at = expires_at.unwrap_or(issued_at + self.default_validity);

        let canonical = CanonicalBytes::new(body)?;
        let body_hash = BodyDigest::compute(&canonical);
        let claims = Claims::new(uri, issued_at, expires_at, body_hash);

        Ok(jws::encode(&Header::pinned(), &claims, self.key)?)
    }
}
