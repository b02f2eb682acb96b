//! # reqsign-core — Foundational Types for Request Signing
//!
//! This crate is the leaf of the reqsign workspace. It defines the primitives
//! shared by the signing and verifying sides of the protocol; both sides must
//! derive byte-identical digests for the same logical request body, so the
//! types here enforce that at compile time.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL digest computation flows through
//!    `CanonicalBytes::new()`, which applies RFC 8785 (JCS) serialization.
//!    No raw `serde_json::to_vec()` for digests. Ever. This makes the
//!    "signer and verifier serialized differently" defect class structurally
//!    impossible.
//!
//! 2. **`BodyDigest` computed only from `CanonicalBytes`.** The function
//!    signature rejects raw bytes, so a digest can never be taken over a
//!    non-canonical serialization.
//!
//! 3. **UTC-only timestamps.** `Timestamp` carries UTC with seconds
//!    precision; token claims embed plain unix seconds, so sub-second
//!    components would be silently lost anyway. Truncating at construction
//!    keeps comparisons exact.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `reqsign-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::BodyDigest;
pub use error::{CanonicalizationError, CryptoError, TimestampError};
pub use temporal::Timestamp;
