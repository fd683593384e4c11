//! # Digest Oracle
//!
//! Defines [`Digest`] and the functions that decide which bytes reach the
//! hash primitive. The primitive is SHA3-256 (FIPS 202), the function every
//! published AGIRAILS type hash and test-vector digest was computed with.
//!
//! ## Security Invariant
//!
//! A `Digest` cannot be built from arbitrary bytes. Structured values reach
//! the hash only through [`sha3_digest()`], which accepts `&CanonicalBytes`;
//! pre-formatted strings (type signatures) reach it through
//! [`digest_raw_string()`]. Both feed UTF-8 bytes and nothing else.

use serde::{Serialize, Serializer};
use sha3::{Digest as _, Sha3_256};

use crate::canonical::CanonicalBytes;
use crate::error::{ActpError, CanonicalizationError};
use crate::value::StructuredValue;

/// Length of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// A 32-byte SHA3-256 output.
///
/// Equality is byte-wise. Renders as `0x` followed by lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    fn of(bytes: &[u8]) -> Self {
        let hash = Sha3_256::digest(bytes);
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&hash);
        Self(out)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex without the `0x` prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Compare against a reference rendering.
    ///
    /// Accepts the digest with or without the `0x` prefix, in any letter case.
    pub fn matches_hex(&self, expected: &str) -> bool {
        let expected = expected.trim();
        let expected = expected
            .strip_prefix("0x")
            .or_else(|| expected.strip_prefix("0X"))
            .unwrap_or(expected);
        expected.eq_ignore_ascii_case(&self.to_hex())
    }

    /// Like [`matches_hex`](Self::matches_hex), but fails with
    /// [`ActpError::Integrity`] carrying both renderings.
    pub fn verify_hex(&self, expected: &str) -> Result<(), ActpError> {
        if self.matches_hex(expected) {
            Ok(())
        } else {
            Err(ActpError::Integrity(format!(
                "digest mismatch: expected {}, computed {self}",
                expected.trim()
            )))
        }
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Hash canonical bytes.
///
/// The signature only admits [`CanonicalBytes`], so no structured value can
/// be hashed without first passing through the canonicalizer.
pub fn sha3_digest(data: &CanonicalBytes) -> Digest {
    Digest::of(data.as_bytes())
}

/// `hash(utf8(canonicalize(value)))`.
pub fn digest_value(value: &StructuredValue) -> Result<Digest, CanonicalizationError> {
    CanonicalBytes::new(value).map(|cb| sha3_digest(&cb))
}

/// Canonicalize and hash any serializable value.
pub fn digest_serialize(obj: &impl Serialize) -> Result<Digest, CanonicalizationError> {
    CanonicalBytes::from_serialize(obj).map(|cb| sha3_digest(&cb))
}

/// `hash(utf8(s))` for pre-formatted strings such as type signatures.
///
/// The string is hashed exactly as given: no normalization, no quoting.
pub fn digest_raw_string(s: &str) -> Digest {
    Digest::of(s.as_bytes())
}
