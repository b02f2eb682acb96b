//! # Compact Token Codec
//!
//! Encodes and decodes the compact signed-token wire format: three
//! base64url-no-pad segments (`header.claims.signature`) where the signature
//! is a raw 64-byte Ed25519 signature over the ASCII of the first two
//! segments.
//!
//! This module is the narrow seam between protocol logic and the signature
//! primitive: [`encode()`], [`decode()`], and
//! [`DecodedToken::verify_signature()`] are the only operations, and the
//! `Signer`/`Verifier` above never touch key arithmetic directly.
//!
//! ## Security Invariant
//!
//! [`decode()`] performs NO cryptographic work. The header's `alg` field is
//! decoded as a plain string — it is attacker-controlled data and must be
//! compared against [`SIGNING_ALGORITHM`] by the caller before any
//! verification is attempted.

use base64::{engine::general_purpose, Engine};
use reqsign_crypto::{verify_detached, Ed25519KeyPair, Ed25519PublicKey};
use serde::{Deserialize, Serialize};

use crate::claims::Claims;
use crate::error::JwsError;

/// The single signature algorithm this protocol accepts.
///
/// EdDSA (Ed25519) is asymmetric: tokens are signed with a private key and
/// verified with a public key. The verifier pins this identifier and rejects
/// every other value, in particular symmetric identifiers like `HS256` — an
/// attacker who knows the public key could otherwise forge an HMAC "signature"
/// keyed by it and have the verifier accept it.
pub const SIGNING_ALGORITHM: &str = "EdDSA";

/// The protected header of a compact token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Declared signature algorithm. Attacker-controlled on the decode path;
    /// deliberately a `String`, never an enum that could normalize unknown
    /// values.
    pub alg: String,
    /// Token type, `"JWT"` by convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl Header {
    /// The header this protocol emits: pinned algorithm, conventional type.
    pub fn pinned() -> Self {
        Self {
            alg: SIGNING_ALGORITHM.to_string(),
            typ: Some("JWT".to_string()),
        }
    }
}

/// An opaque compact signed token.
///
/// Three base64url segments joined by `.`. Created by the signer, consumed
/// by the verifier, never mutated; it has no lifecycle beyond the request it
/// authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedToken(String);

impl SignedToken {
    /// Wrap a compact token string received from a peer.
    ///
    /// No validation happens here; a garbage string simply fails the
    /// verifier's structural gate.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The compact string form, suitable for a request header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SignedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SignedToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A structurally parsed token, before any cryptographic verification.
#[derive(Debug, Clone)]
pub struct DecodedToken {
    /// The decoded protected header. `alg` has NOT been checked.
    pub header: Header,
    /// The decoded claims. Nothing about them has been checked.
    pub claims: Claims,
    /// The exact ASCII the signature covers: `"<b64 header>.<b64 claims>"`.
    signing_input: String,
    /// Raw decoded signature bytes.
    signature: Vec<u8>,
}

impl DecodedToken {
    /// Verify the token's signature bytes against a public key under the
    /// pinned algorithm.
    ///
    /// Returns `Ok(true)` if the signature verifies, `Ok(false)` if it is
    /// cryptographically invalid (wrong key pair), and `Err` if verification
    /// could not be attempted (malformed key, signature of the wrong length).
    /// Callers must have pinned the header algorithm first.
    pub fn verify_signature(&self, public_key: &Ed25519PublicKey) -> Result<bool, JwsError> {
        let ok = verify_detached(self.signing_input.as_bytes(), &self.signature, public_key)?;
        Ok(ok)
    }
}

/// Encode a header/claims pair into a compact token signed with `key`.
///
/// # Errors
///
/// Only on JSON serialization failure of header or claims, which with the
/// types in this crate indicates a caller-contract violation.
pub fn encode(header: &Header, claims: &Claims, key: &Ed25519KeyPair) -> Result<SignedToken, JwsError> {
    let header_b64 = general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(header)?);
    let claims_b64 = general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
    let signing_input = format!("{header_b64}.{claims_b64}");

    let signature = key.sign(signing_input.as_bytes());
    let signature_b64 = general_purpose::URL_SAFE_NO_PAD.encode(signature.as_bytes());

    Ok(SignedToken(format!("{signing_input}.{signature_b64}")))
}

/// Structurally parse a compact token. No cryptographic work.
///
/// # Errors
///
/// `JwsError::Malformed` if the token does not have exactly three non-empty
/// segments, a segment is not valid base64url, or header/claims are not
/// well-formed JSON of the expected shape.
pub fn decode(token: &SignedToken) -> Result<DecodedToken, JwsError> {
    let mut parts = token.as_str().split('.');
    let (header_b64, claims_b64, signature_b64) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(c), Some(s), None) => (h, c, s),
        _ => return Err(JwsError::Malformed("expected three dot-separated segments".into())),
    };
    if header_b64.is_empty() || claims_b64.is_empty() || signature_b64.is_empty() {
        return Err(JwsError::Malformed("empty segment".into()));
    }

    let header_bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|e| JwsError::Malformed(format!("header segment: {e}")))?;
    let claims_bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|e| JwsError::Malformed(format!("claims segment: {e}")))?;
    let signature = general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|e| JwsError::Malformed(format!("signature segment: {e}")))?;

    let header: Header = serde_json::from_slice(&header_bytes)
        .map_err(|e| JwsError::Malformed(format!("header JSON: {e}")))?;
    let claims: Claims = serde_json::from_slice(&claims_bytes)
        .map_err(|e| JwsError::Malformed(format!("claims JSON: {e}")))?;

    Ok(DecodedToken {
        header,
        claims,
        signing_input: format!("{header_b64}.{claims_b64}"),
        signature,
    })
}
