//! # reqsign-crypto — Key Material and Signature Primitives
//!
//! Provides the asymmetric building blocks for the reqsign protocol:
//!
//! - **`Ed25519KeyPair`** — signing side. Generated or derived from a seed
//!   by the caller; the protocol core never stores or rotates keys.
//! - **`Ed25519PublicKey`** — verifying side, hex-encoded for serde.
//! - **`verify_detached()`** — tri-state verification: cryptographic
//!   mismatch is an `Ok(false)`, while malformed inputs (bad key, wrong
//!   signature length) are an `Err`. The token layer maps these to distinct
//!   failure kinds.
//!
//! ## Crate Policy
//!
//! - Depends only on `reqsign-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   Ed25519.
//! - Private keys are never serialized or logged.

pub mod ed25519;

pub use ed25519::{verify_detached, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
