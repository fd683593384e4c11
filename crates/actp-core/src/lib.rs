#![deny(missing_docs)]

//! # actp-core — Canonical Metadata Digests for ACTP
//!
//! Produces bit-identical SHA3-256 digests of structured metadata so that a
//! consumer, provider and mediator agree on a hash regardless of which
//! language computed it. Digests bind off-chain metadata to on-chain or signed
//! commitments.
//!
//! ## Design Principles
//!
//! 1. **Closed value type.** [`StructuredValue`] is a sum type with an explicit
//!    integer/float split. Canonicalization matches it exhaustively.
//!
//! 2. **[`CanonicalBytes`] is the sole path to value digests.** [`sha3_digest`]
//!    accepts only `&CanonicalBytes`; there is no way to hash a structured
//!    value without canonicalizing it first.
//!
//! 3. **Fail loudly.** NaN, infinities, `None` and colliding keys are errors.
//!    A silently wrong canonical form is worse than no digest at all.
//!
//! 4. **Pure and synchronous.** Nothing here allocates shared state, blocks or
//!    logs; every function is safe to call from any thread.
//!
//! ## Example
//!
//! ```
//! use actp_core::{canonicalize, digest_value, StructuredValue};
//!
//! let v = StructuredValue::mapping([("z", 1), ("a", 2)]);
//! assert_eq!(canonicalize(&v).unwrap(), r#"{"a":2,"z":1}"#);
//! assert!(digest_value(&v).unwrap().to_string().starts_with("0x"));
//! ```

pub mod canonical;
pub mod digest;
pub mod error;
pub mod ser;
pub mod value;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::{canonicalize, format_float, CanonicalBytes, MAX_FRACTION_DIGITS};
pub use digest::{
    digest_raw_string, digest_serialize, digest_value, sha3_digest, Digest, DIGEST_LEN,
};
pub use error::{ActpError, CanonicalizationError};
pub use ser::to_structured;
pub use value::StructuredValue;
