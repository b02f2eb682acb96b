//! # Claims — The Signed Payload
//!
//! The claims set binds a request's identity into the token: target URI,
//! issuance and expiry times (unix seconds), and the body digest. Wire field
//! names (`uri`, `iat`, `exp`, `bodyHash`) follow compact-token convention
//! and are fixed; the claims are embedded verbatim as the token payload and
//! are immutable once signed.

use reqsign_core::{BodyDigest, Timestamp};
use serde::{Deserialize, Serialize};

/// The claims set embedded in a signed token.
///
/// `iat` is carried for diagnostics but never independently checked by the
/// verifier; only `exp` bounds validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The target URI the token authenticates.
    pub uri: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds. Strictly before "now" means expired.
    pub exp: i64,
    /// Digest of the canonicalized request body.
    #[serde(rename = "bodyHash")]
    pub body_hash: BodyDigest,
}

impl Claims {
    /// Build a claims set from a request's identity.
    pub fn new(
        uri: impl Into<String>,
        issued_at: Timestamp,
        expires_at: Timestamp,
        body_hash: BodyDigest,
    ) -> Self {
        Self {
            uri: uri.into(),
            iat: issued_at.epoch_secs(),
            exp: expires_at.epoch_secs(),
            body_hash,
        }
    }
}
