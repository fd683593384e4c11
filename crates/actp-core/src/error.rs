//! # Error Hierarchy
//!
//! Structured error types for canonicalization and digest computation, built
//! with `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every failure here is local, synchronous, and deterministic: retrying the
//! same input cannot succeed. A malformed value is rejected outright; the
//! canonicalizer never emits a "best effort" rendering.

use thiserror::Error;

/// Top-level error type for the ACTP core.
#[derive(Error, Debug)]
pub enum ActpError {
    /// Canonicalization failure during digest computation.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Integrity violation: a recomputed digest differs from its reference.
    #[error("integrity error: {0}")]
    Integrity(String),
}

/// Errors during canonical serialization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanonicalizationError {
    /// A value with no canonical representation reached the canonicalizer.
    #[error("unsupported type in canonical form: {0}")]
    UnsupportedType(String),

    /// NaN and the infinities have no decimal rendering.
    #[error("non-finite number has no canonical form: {0}")]
    NonFiniteNumber(f64),

    /// Two mapping keys collapse to the same canonical key.
    #[error("duplicate mapping key after NFC normalization: \"{0}\"")]
    DuplicateKey(String),
}
