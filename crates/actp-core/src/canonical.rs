//! # Canonical Serialization
//!
//! This module defines [`canonicalize`] and [`CanonicalBytes`], the sole
//! construction path for bytes used in value digests.
//!
//! ## Security Invariant
//!
//! The inner buffer of `CanonicalBytes` is private. The only way to obtain one
//! is through [`CanonicalBytes::new()`] or [`CanonicalBytes::from_serialize()`],
//! both of which run the full rendering below. Any function that hashes a
//! structured value accepts `&CanonicalBytes`, so the "wrong serialization
//! path" class of defect cannot be expressed.
//!
//! ## Rendering Rules
//!
//! 1. No whitespace anywhere.
//! 2. `null`, `true`, `false` as literals.
//! 3. Integers in plain decimal.
//! 4. Floats in fixed-point, rounded half away from zero at the 18th
//!    fractional digit, trailing zeros and a bare `.` stripped, `-0` as `0`.
//!    NaN and the infinities are rejected.
//! 5. Strings NFC-normalized, then escaped as `serde_json` does: `"`, `\` and
//!    control characters below U+0020 only. Everything else is literal UTF-8.
//! 6. Lists in order; mappings sorted by the UTF-8 bytes of their keys.
//!
//! Rule 4 reproduces ECMAScript `toFixed(18)` followed by trailing-zero
//! stripping, which is what the reference tooling emits.

use std::collections::BTreeMap;
use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use unicode_normalization::UnicodeNormalization;

use crate::error::CanonicalizationError;
use crate::ser::to_structured;
use crate::value::StructuredValue;

/// Maximum number of fractional digits in a canonical float.
pub const MAX_FRACTION_DIGITS: usize = 18;

/// Enough fractional digits to print any binary64 exactly (2^-1074 has 1074).
const EXACT_FRACTION_DIGITS: usize = 1074;

/// UTF-8 bytes produced exclusively by [`canonicalize`].
///
/// The inner buffer is private; downstream code cannot construct
/// `CanonicalBytes` except through the canonicalizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(String);

impl CanonicalBytes {
    /// Canonicalize a structured value.
    pub fn new(value: &StructuredValue) -> Result<Self, CanonicalizationError> {
        canonicalize(value).map(Self)
    }

    /// Canonicalize any serializable value via [`to_structured`].
    pub fn from_serialize(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = to_structured(obj)?;
        Self::new(&value)
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The canonical form as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }

    /// Length of the canonical form in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical form is empty (never, for a valid value).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Display for CanonicalBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a structured value in canonical form.
///
/// The tree is first normalized (NFC strings and keys, finite floats only),
/// then written by `serde_json` through `CanonicalFormatter`, which owns
/// float rendering. Literal escaping and `BTreeMap` key order come from
/// `serde_json` unchanged.
///
/// # Errors
///
/// - [`CanonicalizationError::NonFiniteNumber`] for NaN or an infinity anywhere
///   in the tree.
/// - [`CanonicalizationError::DuplicateKey`] if two keys of one mapping are
///   equal after NFC normalization.
pub fn canonicalize(value: &StructuredValue) -> Result<String, CanonicalizationError> {
    let normalized = normalize(value)?;
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter);
    normalized
        .serialize(&mut serializer)
        .map_err(|e| CanonicalizationError::UnsupportedType(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| CanonicalizationError::UnsupportedType(e.to_string()))
}

/// NFC-normalize every string and key, and reject values with no canonical form.
///
/// `serde_json` writes non-finite floats as `null` without consulting the
/// formatter, so they must be caught here.
fn normalize(value: &StructuredValue) -> Result<StructuredValue, CanonicalizationError> {
    Ok(match value {
        StructuredValue::Float(f) if !f.is_finite() => {
            return Err(CanonicalizationError::NonFiniteNumber(*f));
        }
        StructuredValue::String(s) => StructuredValue::String(s.nfc().collect()),
        StructuredValue::List(items) => {
            StructuredValue::List(items.iter().map(normalize).collect::<Result<_, _>>()?)
        }
        StructuredValue::Mapping(map) => {
            // `String` ordering is byte-wise over UTF-8, never locale-aware.
            let mut out = BTreeMap::new();
            for (k, v) in map {
                let key: String = k.nfc().collect();
                if out.contains_key(&key) {
                    return Err(CanonicalizationError::DuplicateKey(key));
                }
                out.insert(key, normalize(v)?);
            }
            StructuredValue::Mapping(out)
        }
        other => other.clone(),
    })
}

/// Compact `serde_json` output with floats in canonical fixed-point form.
struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let rendered =
            format_float(value).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writer.write_all(rendered.as_bytes())
    }
}

/// Render a float in canonical fixed-point form.
///
/// The exact decimal expansion of `x` is rounded at the 18th fractional digit,
/// half away from zero. Rounding operates on the exact expansion rather than
/// on a shortest round-trip string, so `0.1` renders as
/// `0.100000000000000006` exactly as `(0.1).toFixed(18)` does.
///
/// # Errors
///
/// Returns [`CanonicalizationError::NonFiniteNumber`] for NaN and infinities.
pub fn format_float(x: f64) -> Result<String, CanonicalizationError> {
    if !x.is_finite() {
        return Err(CanonicalizationError::NonFiniteNumber(x));
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, x.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    // |x| * 10^18, truncated, one decimal digit per element.
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(
            frac_part
                .bytes()
                .chain(std::iter::repeat(b'0'))
                .take(MAX_FRACTION_DIGITS),
        )
        .map(|b| b - b'0')
        .collect();

    // Half away from zero: the magnitude rounds up whenever the first
    // dropped digit is 5 or more.
    let round_up = frac_part
        .as_bytes()
        .get(MAX_FRACTION_DIGITS)
        .is_some_and(|&d| d >= b'5');
    if round_up {
        increment(&mut digits);
    }

    let split = digits.len() - MAX_FRACTION_DIGITS;
    let (int_digits, frac_digits) = digits.split_at(split);
    let frac_len = frac_digits
        .iter()
        .rposition(|&d| d != 0)
        .map_or(0, |last| last + 1);
    let is_zero = digits.iter().all(|&d| d == 0);

    let mut out = String::with_capacity(digits.len() + 2);
    if x.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.extend(int_digits.iter().map(|&d| char::from(b'0' + d)));
    if frac_len > 0 {
        out.push('.');
        out.extend(frac_digits[..frac_len].iter().map(|&d| char::from(b'0' + d)));
    }
    Ok(out)
}

/// Add one unit in the last place to a big-endian decimal digit vector.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for structured values with finite floats and ASCII keys.
    fn structured_value() -> impl Strategy<Value = StructuredValue> {
        let leaf = prop_oneof![
            Just(StructuredValue::Null),
            any::<bool>().prop_map(StructuredValue::Bool),
            any::<i64>().prop_map(StructuredValue::from),
            any::<f64>()
                .prop_filter("finite", |f| f.is_finite())
                .prop_map(StructuredValue::Float),
            "\\PC{0,20}".prop_map(StructuredValue::String),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(StructuredValue::List),
                prop::collection::btree_map("[a-zA-Z0-9_]{0,10}", inner, 0..8)
                    .prop_map(StructuredValue::Mapping),
            ]
        })
    }

    proptest! {
        /// Canonicalization is deterministic.
        #[test]
        fn canonicalize_deterministic(value in structured_value()) {
            let a = canonicalize(&value).unwrap();
            let b = canonicalize(&value).unwrap();
            prop_assert_eq!(a, b);
        }

        /// The canonical form of a finite value is valid JSON.
        #[test]
        fn canonical_form_is_valid_json(value in structured_value()) {
            let s = canonicalize(&value).unwrap();
            let parsed: Result<serde_json::Value, _> = serde_json::from_str(&s);
            prop_assert!(parsed.is_ok(), "not valid JSON: {}", s);
        }

        /// Canonical output never contains whitespace outside string literals.
        #[test]
        fn no_whitespace_between_tokens(value in structured_value()) {
            let s = canonicalize(&value).unwrap();
            let mut in_string = false;
            let mut escaped = false;
            for c in s.chars() {
                if in_string {
                    match (escaped, c) {
                        (true, _) => escaped = false,
                        (false, '\\') => escaped = true,
                        (false, '"') => in_string = false,
                        _ => {}
                    }
                } else {
                    prop_assert!(!c.is_whitespace());
                    if c == '"' {
                        in_string = true;
                    }
                }
            }
        }

        /// Insertion order of mapping pairs never affects the canonical form.
        #[test]
        fn key_order_independent(
            pairs in prop::collection::btree_map("[a-z]{1,8}", any::<i32>(), 0..10)
        ) {
            let forward: Vec<(String, i32)> = pairs.clone().into_iter().collect();
            let reversed: Vec<(String, i32)> = pairs.into_iter().rev().collect();
            let a = canonicalize(&StructuredValue::mapping(forward)).unwrap();
            let b = canonicalize(&StructuredValue::mapping(reversed)).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Integers never gain a decimal point or exponent.
        #[test]
        fn integers_have_no_decimal_point(n in any::<i64>()) {
            let s = canonicalize(&StructuredValue::from(n)).unwrap();
            prop_assert!(!s.contains('.') && !s.contains('e'));
            prop_assert_eq!(s, n.to_string());
        }

        /// Floats have at most 18 fractional digits and no trailing zeros.
        #[test]
        fn float_fraction_bounded(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
            let s = format_float(f).unwrap();
            prop_assert!(!s.contains('e'));
            prop_assert!(s != "-0");
            if let Some((_, frac)) = s.split_once('.') {
                prop_assert!(!frac.is_empty() && frac.len() <= MAX_FRACTION_DIGITS);
                prop_assert!(!frac.ends_with('0'));
            }
        }

        /// The rendering stays within half a unit of the 18th digit.
        #[test]
        fn float_close_to_input(f in -1.0e6f64..1.0e6f64) {
            let s = format_float(f).unwrap();
            let back: f64 = s.parse().unwrap();
            prop_assert!((back - f).abs() <= 1e-9, "{} -> {}", f, s);
        }
    }
}
