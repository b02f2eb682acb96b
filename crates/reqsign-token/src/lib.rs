//! # reqsign-token — Request-Signing Protocol Core
//!
//! A client signs an outgoing request (target URI plus JSON body) with its
//! private key, producing a compact signed token transmitted alongside the
//! request. The server verifies the token against the matching public key
//! before trusting the request's origin, integrity, and freshness.
//!
//! ## Components
//!
//! - **[`Signer`]** — builds claims binding `{ uri, iat, exp, bodyHash }`
//!   and produces a compact token signed with the caller's private key.
//! - **[`Verifier`]** — runs a fixed, ordered gate sequence over a presented
//!   token and returns a [`VerificationResult`]. The order is a security
//!   property: algorithm pinning runs before any cryptographic verification,
//!   closing the classic algorithm-confusion attack where a token declaring
//!   a symmetric algorithm would be "verified" against the public key.
//! - **[`jws`]** — the compact token codec, the narrow seam between protocol
//!   logic and the underlying signature primitive.
//!
//! ## Error Model
//!
//! Malformed or malicious tokens are expected input: every verification
//! failure is recovered into `VerificationResult::Failure { kind, .. }` and
//! nothing escapes the verify boundary. Caller-contract violations (a body
//! that cannot be serialized, malformed key material) are real errors and
//! propagate as [`SignError`] on the signing side.
//!
//! ## Example
//!
//! ```
//! use reqsign_core::Timestamp;
//! use reqsign_crypto::Ed25519KeyPair;
//! use reqsign_token::{Signer, Verifier};
//!
//! let key_pair = Ed25519KeyPair::generate();
//! let body = serde_json::json!({"foo": "bar"});
//! let now = Timestamp::now();
//!
//! let token = Signer::new(&key_pair)
//!     .sign(&body, "/api/v1/payment/1", now, None)
//!     .unwrap();
//!
//! let public_key = key_pair.public_key();
//! let result = Verifier::new(&public_key)
//!     .verify(&token, &body, "/api/v1/payment/1", now);
//! assert!(result.is_success());
//! ```

pub mod claims;
pub mod error;
pub mod jws;
pub mod signer;
pub mod verifier;

// Re-export primary types for ergonomic imports.
pub use claims::Claims;
pub use error::{JwsError, SignError};
pub use jws::{Header, SignedToken, SIGNING_ALGORITHM};
pub use signer::Signer;
pub use verifier::{VerificationErrorKind, VerificationResult, Verifier};
