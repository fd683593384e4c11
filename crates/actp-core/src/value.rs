//! # Structured Values
//!
//! [`StructuredValue`] is the closed set of shapes the canonicalizer accepts.
//! Every variant is handled by an exhaustive `match` in the [`Serialize`]
//! impl below and in [`canonical`](crate::canonical), so adding a shape is a
//! compile-time-checked change rather than a runtime type switch.
//!
//! Integers and floats are separate variants. Callers pick one explicitly;
//! nothing here infers "integer-looking" floats, since that inference is where
//! independent implementations drift apart.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// An in-memory JSON-like value with an explicit integer/float split.
///
/// Containers own their children by value, so no value can be shared or
/// cyclic. Mapping keys are unique by construction of the `BTreeMap`.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredValue {
    /// Explicit null. Absent fields are omitted, never represented here.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A whole number. `i128` spans both the `i64` and `u64` ranges.
    Integer(i128),
    /// A binary64 float, rendered in fixed-point with at most 18 fractional digits.
    Float(f64),
    /// A Unicode string, NFC-normalized at canonicalization time.
    String(String),
    /// An ordered list; order is preserved in the canonical form.
    List(Vec<StructuredValue>),
    /// A string-keyed mapping; keys are byte-sorted in the canonical form.
    Mapping(BTreeMap<String, StructuredValue>),
}

impl StructuredValue {
    /// Build a mapping from `(key, value)` pairs.
    ///
    /// A later pair with the same key replaces an earlier one, matching
    /// `BTreeMap::insert`. Duplicate detection belongs to the source
    /// representation; see [`to_structured`](crate::ser::to_structured) for
    /// a path that rejects duplicates.
    pub fn mapping<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<StructuredValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Mapping(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a list from anything convertible into structured values.
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<StructuredValue>,
        I: IntoIterator<Item = V>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Look up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&StructuredValue> {
        match self {
            Self::Mapping(map) => map.get(key),
            _ => None,
        }
    }
}

/// Plain data-model mapping. Normalization and number formatting are
/// applied by [`canonicalize`](crate::canonical::canonicalize), not here.
impl Serialize for StructuredValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(n) => serializer.serialize_i128(*n),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => serializer.collect_seq(items),
            Self::Mapping(map) => serializer.collect_map(map),
        }
    }
}

impl From<bool> for StructuredValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for StructuredValue {
                fn from(n: $t) -> Self {
                    Self::Integer(i128::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<&str> for StructuredValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for StructuredValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<StructuredValue>> From<Vec<T>> for StructuredValue {
    fn from(items: Vec<T>) -> Self {
        Self::list(items)
    }
}

impl<T: Into<StructuredValue>> From<BTreeMap<String, T>> for StructuredValue {
    fn from(map: BTreeMap<String, T>) -> Self {
        Self::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Convert an already-parsed JSON value.
///
/// Numbers that `serde_json` holds as `i64`/`u64` become [`StructuredValue::Integer`];
/// every other number becomes [`StructuredValue::Float`]. A JSON literal such
/// as `2.0` is therefore a float and canonicalizes to `2`.
impl From<serde_json::Value> for StructuredValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Self::Integer(i128::from(u))
                } else {
                    // Without `arbitrary_precision` every remaining number is an f64.
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
