//! # Canonical Serialization — JCS-Compatible Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! used in body digest computation on both the signing and verifying sides.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which serializes via
//! RFC 8785 (JSON Canonicalization Scheme): sorted keys, compact separators,
//! deterministic number formatting.
//!
//! A signer and a verifier that disagree on serialization of the same logical
//! body would compute different digests and spuriously reject every request.
//! Any function that needs bytes for digest computation must accept
//! `&CanonicalBytes`, and the only way to produce one is through the
//! canonical pipeline, so that disagreement cannot be expressed in code.

use serde::Serialize;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by RFC 8785 (JCS) canonical serialization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - Object keys are sorted lexicographically with compact separators.
/// - The same logical value always yields the same byte sequence, regardless
///   of field ordering or formatting on the input side.
///
/// These invariants are enforced by the constructor and cannot be violated
/// by downstream code because the inner `Vec<u8>` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// This is the ONLY way to construct `CanonicalBytes`. All digest
    /// computation in the workspace must flow through this constructor.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the value
    /// cannot be serialized to JSON (e.g. a map with non-string keys, or a
    /// custom `Serialize` impl that fails). A request body that cannot be
    /// serialized is a caller-contract violation, not a protocol failure.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let s = serde_jcs::to_string(obj)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
