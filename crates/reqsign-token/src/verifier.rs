//! # Verifier — Ordered Fail-Closed Gate Sequence
//!
//! Verifies a presented token against the public key and the reconstructed
//! request context (body, URI, current time). The checks run in a fixed
//! order and short-circuit on the first failure; the order is a correctness
//! property of the protocol, not an implementation detail.
//!
//! ## Security Invariant
//!
//! Gate 2 (algorithm pinning) runs strictly before any cryptographic
//! verification. The header's declared algorithm is attacker-controlled: a
//! token declaring `HS256` asks the verifier to compute an HMAC keyed by
//! whatever "key" it is given — and the verifier's key is the *public* key,
//! which the attacker also knows. A verifier that honors the declared
//! algorithm therefore accepts forged tokens (CVE-2015-9235). Pinning must
//! reject before the signature bytes are ever touched.
//!
//! ## Failure Reporting
//!
//! Every failure is recovered locally and surfaced as
//! [`VerificationResult::Failure`]; no error or panic crosses the verify
//! boundary for malformed or malicious input. The failure kind identifies
//! which gate rejected — useful for logs, but it should not be echoed
//! verbatim to an untrusted client, since it tells an attacker which gate
//! they reached. [`VerificationResult::is_success()`] is the minimal surface
//! to expose.

use reqsign_core::{BodyDigest, CanonicalBytes, Timestamp};
use reqsign_crypto::Ed25519PublicKey;
use serde::Serialize;

use crate::jws::{self, SignedToken, SIGNING_ALGORITHM};

/// Which verification gate rejected a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationErrorKind {
    /// The token is structurally malformed (gate 1).
    InvalidSignature,
    /// The declared algorithm does not match the pinned one (gate 2).
    InvalidPayload,
    /// The token's expiry is strictly before "now" (gate 3).
    Expired,
    /// The claimed URI differs from the request's actual URI (gate 4).
    UriMismatch,
    /// The recomputed body digest differs from the claimed digest (gate 5).
    BodyMismatch,
    /// The signature is cryptographically invalid for this key (gate 6).
    KeyMismatch,
    /// The cryptographic verification step failed internally (gate 6).
    UnverifiedSignature,
}

impl VerificationErrorKind {
    /// Human-readable description of the failure.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "Invalid signature",
            Self::InvalidPayload => "Invalid JWT payload",
            Self::Expired => "Signature has expired",
            Self::UriMismatch => "Mismatch signed URI",
            Self::BodyMismatch => "Mismatch signed body hash",
            Self::KeyMismatch => "Mismatch key pair",
            Self::UnverifiedSignature => "Unverified signature",
        }
    }
}

impl std::fmt::Display for VerificationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// The outcome of a verification attempt.
///
/// A pure value: carries no residual state and is returned by value. Failure
/// carries enough detail to log which gate rejected; treat that detail as
/// internal diagnostics, not client-facing output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// All gates passed, in order.
    Success,
    /// A gate rejected the token.
    Failure {
        /// Which gate rejected.
        kind: VerificationErrorKind,
        /// Diagnostic message for logs.
        message: String,
    },
}

impl VerificationResult {
    /// True if every gate passed.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The failure kind, if any. For logging and tests.
    pub fn failure_kind(&self) -> Option<VerificationErrorKind> {
        match self {
            Self::Success => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    fn fail(kind: VerificationErrorKind) -> Self {
        Self::Failure {
            kind,
            message: kind.description().to_string(),
        }
    }

    fn fail_with(kind: VerificationErrorKind, detail: impl std::fmt::Display) -> Self {
        Self::Failure {
            kind,
            message: format!("{}: {detail}", kind.description()),
        }
    }
}

/// Verifies tokens with a borrowed public key.
///
/// Pure and stateless: each call operates solely on its arguments, mutates
/// nothing, and is safely usable from concurrent tasks.
#[derive(Debug)]
pub struct Verifier<'a> {
    public_key: &'a Ed25519PublicKey,
}

impl<'a> Verifier<'a> {
    /// Create a verifier for the given public key.
    pub fn new(public_key: &'a Ed25519PublicKey) -> Self {
        Self { public_key }
    }

    /// Run the full gate sequence over a presented token.
    ///
    /// `body` and `uri` are the request context reconstructed on the
    /// receiving side; `now` is the caller's trusted current time.
    ///
    /// Gates, in order, short-circuiting on first failure:
    ///
    /// 1. structural parse — `InvalidSignature`
    /// 2. algorithm pinning — `InvalidPayload`
    /// 3. expiry — `Expired`
    /// 4. URI binding — `UriMismatch`
    /// 5. body binding — `BodyMismatch`
    /// 6. signature verification — `KeyMismatch` / `UnverifiedSignature`
    pub fn verify(
        &self,
        token: &SignedToken,
        body: &impl Serialize,
        uri: &str,
        now: Timestamp,
    ) -> VerificationResult {
        use VerificationErrorKind::*;

        // Gate 1: structural validity. No crypto has happened yet.
        let decoded = match jws::decode(token) {
            Ok(decoded) => decoded,
            Err(e) => return VerificationResult::fail_with(InvalidSignature, e),
        };

        // Gate 2: algorithm pinning. Must run before the signature bytes are
        // touched; the declared algorithm is attacker-controlled.
        if decoded.header.alg != SIGNING_ALGORITHM {
            return VerificationResult::fail_with(
                InvalidPayload,
                format!("declared algorithm {:?}", decoded.header.alg),
            );
        }

        // Gate 3: expiry. iat is carried but never checked on its own.
        if decoded.claims.exp < now.epoch_secs() {
            return VerificationResult::fail(Expired);
        }

        // Gate 4: URI binding. Exact string equality.
        if decoded.claims.uri != uri {
            return VerificationResult::fail(UriMismatch);
        }

        // Gate 5: body binding. A verifier-side body that cannot be
        // canonicalized is a caller fault, but nothing may escape this
        // boundary; it is folded into the internal-failure kind.
        let canonical = match CanonicalBytes::new(body) {
            Ok(canonical) => canonical,
            Err(e) => return VerificationResult::fail_with(UnverifiedSignature, e),
        };
        if BodyDigest::compute(&canonical) != decoded.claims.body_hash {
            return VerificationResult::fail(BodyMismatch);
        }

        // Gate 6: cryptographic verification, only now.
        match decoded.verify_signature(self.public_key) {
            Ok(true) => VerificationResult::Success,
            Ok(false) => VerificationResult::fail(KeyMismatch),
            Err(e) => VerificationResult::fail_with(UnverifiedSignature, e),
        }
    }
}
