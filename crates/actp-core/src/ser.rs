//! # Serde Bridge
//!
//! [`to_structured`] turns any `Serialize` type into a [`StructuredValue`]
//! without passing through `serde_json::Value`. Going through `serde_json`
//! would silently turn NaN into `null` and accept `None` as `null`; both are
//! rejected here instead.
//!
//! | serde data model          | result                                  |
//! |---------------------------|-----------------------------------------|
//! | bool                      | `Bool`                                  |
//! | i8..i128, u8..u128        | `Integer` (u128 above `i128::MAX` fails) |
//! | f32, f64                  | `Float` (non-finite fails)              |
//! | char, str                 | `String`                                |
//! | bytes                     | fails: hex-encode upstream              |
//! | none                      | fails: absent has no canonical form     |
//! | some(v)                   | `v`                                     |
//! | unit, unit struct         | `Null`                                  |
//! | unit variant              | variant name as `String`                |
//! | newtype struct            | inner value                             |
//! | newtype/tuple/struct variant | `{variant: payload}`                 |
//! | seq, tuple, tuple struct  | `List`                                  |
//! | map, struct               | `Mapping` (string keys, no duplicates)  |

use std::collections::btree_map::{BTreeMap, Entry};
use std::fmt::Display;

use serde::ser::{self, Impossible, Serialize};

use crate::error::CanonicalizationError;
use crate::value::StructuredValue;

/// Convert a serializable value into a [`StructuredValue`].
///
/// Typed request structs should mark optional fields with
/// `#[serde(skip_serializing_if = "Option::is_none")]`; an unskipped `None`
/// is rejected rather than guessed at.
///
/// # Errors
///
/// - [`CanonicalizationError::UnsupportedType`] for `None`, byte arrays,
///   non-string map keys and out-of-range `u128`.
/// - [`CanonicalizationError::NonFiniteNumber`] for NaN and infinities.
/// - [`CanonicalizationError::DuplicateKey`] when a map emits a key twice.
pub fn to_structured<T>(value: &T) -> Result<StructuredValue, CanonicalizationError>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

impl ser::Error for CanonicalizationError {
    fn custom<T: Display>(msg: T) -> Self {
        CanonicalizationError::UnsupportedType(msg.to_string())
    }
}

fn single_entry(variant: &'static str, payload: StructuredValue) -> StructuredValue {
    let mut map = BTreeMap::new();
    map.insert(variant.to_owned(), payload);
    StructuredValue::Mapping(map)
}

fn insert_unique(
    entries: &mut BTreeMap<String, StructuredValue>,
    key: String,
    value: StructuredValue,
) -> Result<(), CanonicalizationError> {
    match entries.entry(key) {
        Entry::Occupied(slot) => Err(CanonicalizationError::DuplicateKey(slot.key().clone())),
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    }
}

struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = StructuredValue;
    type Error = CanonicalizationError;

    type SerializeSeq = ListBuilder;
    type SerializeTuple = ListBuilder;
    type SerializeTupleStruct = ListBuilder;
    type SerializeTupleVariant = TupleVariantBuilder;
    type SerializeMap = MappingBuilder;
    type SerializeStruct = MappingBuilder;
    type SerializeStructVariant = StructVariantBuilder;

    fn serialize_bool(self, v: bool) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<StructuredValue, CanonicalizationError> {
        i128::try_from(v).map(StructuredValue::Integer).map_err(|_| {
            CanonicalizationError::UnsupportedType(format!("u128 {v} exceeds the integer range"))
        })
    }

    fn serialize_f32(self, v: f32) -> Result<StructuredValue, CanonicalizationError> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<StructuredValue, CanonicalizationError> {
        if v.is_finite() {
            Ok(StructuredValue::Float(v))
        } else {
            Err(CanonicalizationError::NonFiniteNumber(v))
        }
    }

    fn serialize_char(self, v: char) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::String(v.to_owned()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<StructuredValue, CanonicalizationError> {
        Err(CanonicalizationError::UnsupportedType(
            "byte array (hex-encode it before canonicalizing)".to_string(),
        ))
    }

    fn serialize_none(self) -> Result<StructuredValue, CanonicalizationError> {
        Err(CanonicalizationError::UnsupportedType(
            "absent value (None); omit the field or use an explicit null".to_string(),
        ))
    }

    fn serialize_some<T>(self, value: &T) -> Result<StructuredValue, CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::Null)
    }

    fn serialize_unit_struct(
        self,
        _name: &'static str,
    ) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<StructuredValue, CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<StructuredValue, CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        Ok(single_entry(variant, to_structured(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<ListBuilder, CanonicalizationError> {
        Ok(ListBuilder {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<ListBuilder, CanonicalizationError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<ListBuilder, CanonicalizationError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TupleVariantBuilder, CanonicalizationError> {
        Ok(TupleVariantBuilder {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MappingBuilder, CanonicalizationError> {
        Ok(MappingBuilder::default())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<MappingBuilder, CanonicalizationError> {
        Ok(MappingBuilder::default())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<StructVariantBuilder, CanonicalizationError> {
        Ok(StructVariantBuilder {
            variant,
            fields: BTreeMap::new(),
        })
    }
}

struct ListBuilder {
    items: Vec<StructuredValue>,
}

impl ser::SerializeSeq for ListBuilder {
    type Ok = StructuredValue;
    type Error = CanonicalizationError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_structured(value)?);
        Ok(())
    }

    fn end(self) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::List(self.items))
    }
}

impl ser::SerializeTuple for ListBuilder {
    type Ok = StructuredValue;
    type Error = CanonicalizationError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<StructuredValue, CanonicalizationError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for ListBuilder {
    type Ok = StructuredValue;
    type Error = CanonicalizationError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<StructuredValue, CanonicalizationError> {
        ser::SerializeSeq::end(self)
    }
}

struct TupleVariantBuilder {
    variant: &'static str,
    items: Vec<StructuredValue>,
}

impl ser::SerializeTupleVariant for TupleVariantBuilder {
    type Ok = StructuredValue;
    type Error = CanonicalizationError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_structured(value)?);
        Ok(())
    }

    fn end(self) -> Result<StructuredValue, CanonicalizationError> {
        Ok(single_entry(self.variant, StructuredValue::List(self.items)))
    }
}

#[derive(Default)]
struct MappingBuilder {
    entries: BTreeMap<String, StructuredValue>,
    pending_key: Option<String>,
}

impl ser::SerializeMap for MappingBuilder {
    type Ok = StructuredValue;
    type Error = CanonicalizationError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        self.pending_key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        let key = self.pending_key.take().ok_or_else(|| {
            CanonicalizationError::UnsupportedType("map value emitted without a key".to_string())
        })?;
        insert_unique(&mut self.entries, key, to_structured(value)?)
    }

    fn end(self) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::Mapping(self.entries))
    }
}

impl ser::SerializeStruct for MappingBuilder {
    type Ok = StructuredValue;
    type Error = CanonicalizationError;

    fn serialize_field<T>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        insert_unique(&mut self.entries, key.to_owned(), to_structured(value)?)
    }

    fn end(self) -> Result<StructuredValue, CanonicalizationError> {
        Ok(StructuredValue::Mapping(self.entries))
    }
}

struct StructVariantBuilder {
    variant: &'static str,
    fields: BTreeMap<String, StructuredValue>,
}

impl ser::SerializeStructVariant for StructVariantBuilder {
    type Ok = StructuredValue;
    type Error = CanonicalizationError;

    fn serialize_field<T>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        insert_unique(&mut self.fields, key.to_owned(), to_structured(value)?)
    }

    fn end(self) -> Result<StructuredValue, CanonicalizationError> {
        Ok(single_entry(self.variant, StructuredValue::Mapping(self.fields)))
    }
}

/// Serializer for mapping keys: only strings, chars and unit variants.
struct KeySerializer;

fn key_rejected(kind: &str) -> CanonicalizationError {
    CanonicalizationError::UnsupportedType(format!("mapping key must be a string, got {kind}"))
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = CanonicalizationError;

    type SerializeSeq = Impossible<String, CanonicalizationError>;
    type SerializeTuple = Impossible<String, CanonicalizationError>;
    type SerializeTupleStruct = Impossible<String, CanonicalizationError>;
    type SerializeTupleVariant = Impossible<String, CanonicalizationError>;
    type SerializeMap = Impossible<String, CanonicalizationError>;
    type SerializeStruct = Impossible<String, CanonicalizationError>;
    type SerializeStructVariant = Impossible<String, CanonicalizationError>;

    fn serialize_str(self, v: &str) -> Result<String, CanonicalizationError> {
        Ok(v.to_owned())
    }

    fn serialize_char(self, v: char) -> Result<String, CanonicalizationError> {
        Ok(v.to_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, CanonicalizationError> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> Result<String, CanonicalizationError> {
        Err(key_rejected("boolean"))
    }

    fn serialize_i8(self, _v: i8) -> Result<String, CanonicalizationError> {
        Err(key_rejected("integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<String, CanonicalizationError> {
        Err(key_rejected("integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<String, CanonicalizationError> {
        Err(key_rejected("integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<String, CanonicalizationError> {
        Err(key_rejected("integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<String, CanonicalizationError> {
        Err(key_rejected("integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<String, CanonicalizationError> {
        Err(key_rejected("integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<String, CanonicalizationError> {
        Err(key_rejected("integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<String, CanonicalizationError> {
        Err(key_rejected("integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<String, CanonicalizationError> {
        Err(key_rejected("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<String, CanonicalizationError> {
        Err(key_rejected("float"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, CanonicalizationError> {
        Err(key_rejected("bytes"))
    }

    fn serialize_none(self) -> Result<String, CanonicalizationError> {
        Err(key_rejected("none"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String, CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        Err(key_rejected("option"))
    }

    fn serialize_unit(self) -> Result<String, CanonicalizationError> {
        Err(key_rejected("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, CanonicalizationError> {
        Err(key_rejected("unit struct"))
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, CanonicalizationError>
    where
        T: ?Sized + Serialize,
    {
        Err(key_rejected("enum variant with data"))
    }

    fn serialize_seq(
        self,
        _len: Option<usize>,
    ) -> Result<Self::SerializeSeq, CanonicalizationError> {
        Err(key_rejected("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, CanonicalizationError> {
        Err(key_rejected("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, CanonicalizationError> {
        Err(key_rejected("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, CanonicalizationError> {
        Err(key_rejected("enum variant with data"))
    }

    fn serialize_map(
        self,
        _len: Option<usize>,
    ) -> Result<Self::SerializeMap, CanonicalizationError> {
        Err(key_rejected("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, CanonicalizationError> {
        Err(key_rejected("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, CanonicalizationError> {
        Err(key_rejected("enum variant with data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::canonicalize;
    use serde::ser::SerializeMap;
    use serde::Serialize;
    use std::collections::HashMap;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct PaymentTerms {
        amount: String,
        currency: String,
        decimals: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_price: Option<String>,
        deadline: u64,
        dispute_window: u64,
    }

    fn terms(max_price: Option<&str>) -> PaymentTerms {
        PaymentTerms {
            amount: "50000".to_string(),
            currency: "USDC".to_string(),
            decimals: 6,
            max_price: max_price.map(str::to_string),
            deadline: 1_732_000_000,
            dispute_window: 3600,
        }
    }

    #[test]
    fn typed_struct_matches_hand_built_value() {
        let v = to_structured(&terms(None)).unwrap();
        assert_eq!(
            canonicalize(&v).unwrap(),
            r#"{"amount":"50000","currency":"USDC","deadline":1732000000,"decimals":6,"disputeWindow":3600}"#
        );
    }

    #[test]
    fn skipped_option_is_omitted_and_some_is_rendered() {
        let v = to_structured(&terms(Some("100000"))).unwrap();
        assert_eq!(
            v.get("maxPrice"),
            Some(&StructuredValue::String("100000".to_string()))
        );
    }

    #[test]
    fn unskipped_none_is_rejected() {
        #[derive(Serialize)]
        struct Partial {
            cid: Option<String>,
        }
        let err = to_structured(&Partial { cid: None }).unwrap_err();
        match err {
            CanonicalizationError::UnsupportedType(msg) => assert!(msg.contains("absent")),
            other => panic!("expected UnsupportedType, got: {other}"),
        }
    }

    #[test]
    fn explicit_null_is_accepted() {
        let v = to_structured(&serde_json::json!({"cid": null})).unwrap();
        assert_eq!(v.get("cid"), Some(&StructuredValue::Null));
        assert_eq!(to_structured(&()).unwrap(), StructuredValue::Null);
    }

    #[test]
    fn non_finite_float_rejected() {
        let err = to_structured(&vec![1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, CanonicalizationError::NonFiniteNumber(_)));
        let err = to_structured(&f32::INFINITY).unwrap_err();
        assert!(matches!(err, CanonicalizationError::NonFiniteNumber(_)));
    }

    #[test]
    fn floats_and_integers_keep_their_tags() {
        assert_eq!(to_structured(&2.0f64).unwrap(), StructuredValue::Float(2.0));
        assert_eq!(to_structured(&2u8).unwrap(), StructuredValue::Integer(2));
        assert_eq!(
            to_structured(&u128::from(u64::MAX)).unwrap(),
            StructuredValue::Integer(i128::from(u64::MAX))
        );
    }

    #[test]
    fn oversized_u128_rejected() {
        let err = to_structured(&u128::MAX).unwrap_err();
        assert!(matches!(err, CanonicalizationError::UnsupportedType(_)));
    }

    #[test]
    fn byte_arrays_rejected() {
        struct Raw;
        impl Serialize for Raw {
            fn serialize<S: ser::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_bytes(&[0xde, 0xad])
            }
        }
        let err = to_structured(&Raw).unwrap_err();
        assert!(matches!(err, CanonicalizationError::UnsupportedType(_)));
    }

    #[test]
    fn non_string_keys_rejected() {
        let mut map = HashMap::new();
        map.insert(1u32, "one");
        let err = to_structured(&map).unwrap_err();
        match err {
            CanonicalizationError::UnsupportedType(msg) => assert!(msg.contains("integer")),
            other => panic!("expected UnsupportedType, got: {other}"),
        }
    }

    #[test]
    fn duplicate_map_keys_rejected() {
        struct Twice;
        impl Serialize for Twice {
            fn serialize<S: ser::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                let mut map = s.serialize_map(Some(2))?;
                map.serialize_entry("nonce", &1)?;
                map.serialize_entry("nonce", &2)?;
                map.end()
            }
        }
        let err = to_structured(&Twice).unwrap_err();
        assert_eq!(err, CanonicalizationError::DuplicateKey("nonce".to_string()));
    }

    #[test]
    fn insertion_order_does_not_matter() {
        struct Ordered(Vec<(&'static str, i32)>);
        impl Serialize for Ordered {
            fn serialize<S: ser::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                let mut map = s.serialize_map(Some(self.0.len()))?;
                for (k, v) in &self.0 {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
        let a = to_structured(&Ordered(vec![("z", 1), ("a", 2), ("m", 3)])).unwrap();
        let b = to_structured(&Ordered(vec![("m", 3), ("z", 1), ("a", 2)])).unwrap();
        assert_eq!(canonicalize(&a).unwrap(), canonicalize(&b).unwrap());
    }

    #[test]
    fn enums_use_external_tagging() {
        #[derive(Serialize)]
        #[serde(rename_all = "lowercase")]
        enum Ruling {
            Consumer,
            Split { consumer_share: u16, provider_share: u16 },
            Custom(String),
            Pair(u8, u8),
        }
        assert_eq!(
            to_structured(&Ruling::Consumer).unwrap(),
            StructuredValue::from("consumer")
        );
        let split = to_structured(&Ruling::Split {
            consumer_share: 6000,
            provider_share: 4000,
        })
        .unwrap();
        assert_eq!(
            canonicalize(&split).unwrap(),
            r#"{"split":{"consumer_share":6000,"provider_share":4000}}"#
        );
        let custom = to_structured(&Ruling::Custom("x".to_string())).unwrap();
        assert_eq!(canonicalize(&custom).unwrap(), r#"{"custom":"x"}"#);
        let pair = to_structured(&Ruling::Pair(1, 2)).unwrap();
        assert_eq!(canonicalize(&pair).unwrap(), r#"{"pair":[1,2]}"#);
    }

    #[test]
    fn tuples_and_chars_convert() {
        let v = to_structured(&(1, 'x', "y")).unwrap();
        assert_eq!(canonicalize(&v).unwrap(), r#"[1,"x","y"]"#);
    }
}
