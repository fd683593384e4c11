//! # Message Schemas
//!
//! A [`SchemaDefinition`] is a struct name plus an ordered list of typed
//! fields. Its identity is the EIP-712 style type signature
//!
//! ```text
//! Name(type1 name1,type2 name2,...)
//! ```
//!
//! and its type hash is the SHA3-256 of that signature's UTF-8 bytes, taken
//! through [`actp_core::digest_raw_string`]. The signature is a flat string,
//! so it never passes through the structured-value canonicalizer.
//!
//! ## Field Order
//!
//! Field order is part of the identity. Two schemas with the same field set
//! in a different order have different type hashes, because position is part
//! of what a signer authenticates.

use actp_core::{digest_raw_string, Digest};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// One typed field of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    /// Field name as it appears in the signature.
    pub name: String,
    /// ABI elementary type (`string`, `bytes32`, `uint256`, ...).
    #[serde(rename = "type")]
    pub field_type: String,
}

impl FieldSpec {
    /// Build a field from its name and type.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }
}

/// A named, ordered field list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDefinition {
    /// Struct name, the prefix of the type signature.
    pub name: String,
    /// Fields in declared order.
    pub fields: Vec<FieldSpec>,
}

impl SchemaDefinition {
    /// Build a schema from `(name, type)` pairs in declared order.
    pub fn new<N, T, I>(name: impl Into<String>, fields: I) -> Self
    where
        N: Into<String>,
        T: Into<String>,
        I: IntoIterator<Item = (N, T)>,
    {
        Self {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(n, t)| FieldSpec::new(n, t))
                .collect(),
        }
    }

    /// `Name(type1 name1,type2 name2,...)`.
    pub fn type_signature(&self) -> String {
        let params: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{} {}", f.field_type, f.name))
            .collect();
        format!("{}({})", self.name, params.join(","))
    }

    /// SHA3-256 of the type signature.
    pub fn type_hash(&self) -> Digest {
        digest_raw_string(&self.type_signature())
    }

    /// Check that the schema can produce an unambiguous signature.
    ///
    /// The struct name and every field name must be identifiers, field names
    /// must be unique, and every field type must be an ABI elementary type
    /// (see [`is_elementary_type`]).
    pub fn validate(&self) -> Result<(), RegistryError> {
        if !is_identifier(&self.name) {
            return Err(self.invalid(format!("\"{}\" is not an identifier", self.name)));
        }
        let mut seen = std::collections::BTreeSet::new();
        for field in &self.fields {
            if !is_identifier(&field.name) {
                return Err(self.invalid(format!(
                    "field name \"{}\" is not an identifier",
                    field.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(self.invalid(format!("field \"{}\" is declared twice", field.name)));
            }
            if !is_elementary_type(&field.field_type) {
                return Err(RegistryError::InvalidFieldType {
                    schema: self.name.clone(),
                    field: field.name.clone(),
                    field_type: field.field_type.clone(),
                });
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> RegistryError {
        RegistryError::InvalidSchema {
            schema: self.name.clone(),
            reason,
        }
    }
}

/// Whether `ty` is an ABI elementary type.
///
/// Accepted: `string`, `bytes`, `bool`, `address`, `uint<N>` and `int<N>`
/// with `N` a multiple of 8 in `8..=256`, and `bytes<N>` with `N` in `1..=32`.
/// Bare `uint`/`int` aliases are rejected: the signature must spell the width.
pub fn is_elementary_type(ty: &str) -> bool {
    match ty {
        "string" | "bytes" | "bool" | "address" => return true,
        _ => {}
    }
    if let Some(width) = ty.strip_prefix("uint").or_else(|| ty.strip_prefix("int")) {
        return parse_width(width).is_some_and(|n| n % 8 == 0 && (8..=256).contains(&n));
    }
    if let Some(width) = ty.strip_prefix("bytes") {
        return parse_width(width).is_some_and(|n| (1..=32).contains(&n));
    }
    false
}

// Decimal width without sign or leading zeros.
fn parse_width(s: &str) -> Option<u32> {
    if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

// ---------------------------------------------------------------------------
// Signing domain
// ---------------------------------------------------------------------------

/// Name and version components of an EIP-712 signing domain.
///
/// The chain id and verifying contract are deployment-specific and supplied
/// by the signer; only the constant part is defined here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Eip712Domain {
    /// Domain name.
    pub name: &'static str,
    /// Domain version.
    pub version: &'static str,
}

/// The ACTP signing domain.
pub const ACTP_DOMAIN: Eip712Domain = Eip712Domain {
    name: "AGIRAILS",
    version: "1",
};

/// The `EIP712Domain` struct schema.
pub fn eip712_domain_schema() -> SchemaDefinition {
    SchemaDefinition::new(
        "EIP712Domain",
        [
            ("name", "string"),
            ("version", "string"),
            ("chainId", "uint256"),
            ("verifyingContract", "address"),
        ],
    )
}
