//! # Type Hash Registry
//!
//! Maps message-type identifiers (`agirails.request.v1`, ...) to their schema,
//! version label and type hash.
//!
//! ## Lifecycle
//!
//! A [`TypeHashRegistry`] is filled through [`TypeHashRegistry::register_schema`]
//! and is read-only once handed out. The process-wide instance returned by
//! [`builtin_registry`] is built exactly once, on first use, from
//! [`builtin_catalogue`](crate::catalogue::builtin_catalogue) and is then
//! shared by reference. Lookups on it need no locking.
//!
//! ## Security Invariant
//!
//! A catalogue entry may pin the type hash it expects. Registration recomputes
//! the hash from the signature and refuses the entry if the two differ, so a
//! typo in a field list cannot silently produce a different signing type.

use std::collections::btree_map::{self, BTreeMap};
use std::sync::OnceLock;

use actp_core::Digest;
use serde::{Deserialize, Serialize};

use crate::catalogue::builtin_catalogue;
use crate::error::RegistryError;
use crate::schema::SchemaDefinition;

/// A schema as declared in a catalogue, before registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogueEntry {
    /// Message-type identifier used for lookup.
    pub message_type: String,
    /// Opaque version or registry label. Not part of the hash.
    pub version_label: String,
    /// The struct schema.
    pub schema: SchemaDefinition,
    /// Expected type hash, `0x`-prefixed or bare hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_hash: Option<String>,
}

/// A registered schema together with its derived type hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeHashEntry {
    message_type: String,
    version_label: String,
    schema: SchemaDefinition,
    type_hash: Digest,
}

impl TypeHashEntry {
    /// Message-type identifier.
    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    /// Version or registry label, passed through unchanged.
    pub fn version_label(&self) -> &str {
        &self.version_label
    }

    /// The registered schema.
    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    /// SHA3-256 of the schema's type signature.
    pub fn type_hash(&self) -> Digest {
        self.type_hash
    }

    /// The schema's type signature.
    pub fn type_signature(&self) -> String {
        self.schema.type_signature()
    }
}

/// Message-type identifier to [`TypeHashEntry`].
#[derive(Debug, Clone, Default)]
pub struct TypeHashRegistry {
    entries: BTreeMap<String, TypeHashEntry>,
}

impl TypeHashRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from catalogue entries, registering them in order.
    ///
    /// Stops at the first entry that fails to register.
    pub fn from_catalogue(
        entries: impl IntoIterator<Item = CatalogueEntry>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for entry in entries {
            registry.register_schema(entry)?;
        }
        Ok(registry)
    }

    /// Validate a schema, derive its type hash and store it.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidFieldType`] / [`RegistryError::InvalidSchema`]
    ///   if the schema fails [`SchemaDefinition::validate`].
    /// - [`RegistryError::TypeHashMismatch`] if the entry pins a hash the
    ///   signature does not produce.
    /// - [`RegistryError::DuplicateSchemaRegistration`] if the identifier is
    ///   already taken.
    pub fn register_schema(&mut self, entry: CatalogueEntry) -> Result<&TypeHashEntry, RegistryError> {
        let CatalogueEntry {
            message_type,
            version_label,
            schema,
            type_hash: pinned,
        } = entry;

        if message_type.trim().is_empty() {
            return Err(RegistryError::InvalidSchema {
                schema: schema.name,
                reason: "message type identifier is empty".to_string(),
            });
        }
        schema.validate()?;

        let type_hash = schema.type_hash();
        if let Some(expected) = pinned {
            if !type_hash.matches_hex(&expected) {
                return Err(RegistryError::TypeHashMismatch {
                    message_type,
                    expected,
                    computed: type_hash,
                });
            }
        }

        match self.entries.entry(message_type) {
            btree_map::Entry::Occupied(slot) => Err(RegistryError::DuplicateSchemaRegistration(
                slot.key().clone(),
            )),
            btree_map::Entry::Vacant(slot) => {
                tracing::debug!(
                    message_type = %slot.key(),
                    version_label = %version_label,
                    type_hash = %type_hash,
                    "registered schema"
                );
                let message_type = slot.key().clone();
                Ok(slot.insert(TypeHashEntry {
                    message_type,
                    version_label,
                    schema,
                    type_hash,
                }))
            }
        }
    }

    /// Resolve a message-type identifier.
    pub fn lookup(&self, message_type: &str) -> Result<&TypeHashEntry, RegistryError> {
        self.entries
            .get(message_type)
            .ok_or_else(|| RegistryError::UnknownMessageType(message_type.to_string()))
    }

    /// Type hash for a message type.
    pub fn type_hash(&self, message_type: &str) -> Result<Digest, RegistryError> {
        self.lookup(message_type).map(TypeHashEntry::type_hash)
    }

    /// Schema for a message type.
    pub fn schema(&self, message_type: &str) -> Result<&SchemaDefinition, RegistryError> {
        self.lookup(message_type).map(TypeHashEntry::schema)
    }

    /// Entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeHashEntry> {
        self.entries.values()
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static BUILTIN_REGISTRY: OnceLock<Result<TypeHashRegistry, RegistryError>> = OnceLock::new();

/// The process-wide registry of AGIRAILS message types.
///
/// Built on first call; every later call returns the same instance, or the
/// same error if building it failed.
pub fn builtin_registry() -> Result<&'static TypeHashRegistry, RegistryError> {
    BUILTIN_REGISTRY
        .get_or_init(|| {
            let registry = TypeHashRegistry::from_catalogue(builtin_catalogue().schemas)?;
            tracing::info!(schemas = registry.len(), "built-in type hash registry sealed");
            Ok(registry)
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// Look up a message type in the [`builtin_registry`].
pub fn lookup_message_type(message_type: &str) -> Result<&'static TypeHashEntry, RegistryError> {
    builtin_registry()?.lookup(message_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message_type: &str, fields: &[(&str, &str)]) -> CatalogueEntry {
        CatalogueEntry {
            message_type: message_type.to_string(),
            version_label: "TEST-1".to_string(),
            schema: SchemaDefinition::new("Sample", fields.iter().copied()),
            type_hash: None,
        }
    }

    #[test]
    fn register_then_lookup() {
        let mut reg = TypeHashRegistry::new();
        let hash = reg
            .register_schema(entry("test.sample.v1", &[("id", "bytes32")]))
            .unwrap()
            .type_hash();
        let found = reg.lookup("test.sample.v1").unwrap();
        assert_eq!(found.type_hash(), hash);
        assert_eq!(found.version_label(), "TEST-1");
        assert_eq!(found.type_signature(), "Sample(bytes32 id)");
        assert_eq!(reg.len(), 1);
        assert!(!reg.is_empty());
    }

    #[test]
    fn unknown_message_type() {
        let reg = TypeHashRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(
            reg.lookup("test.missing.v1").unwrap_err(),
            RegistryError::UnknownMessageType("test.missing.v1".into())
        );
        assert!(reg.type_hash("test.missing.v1").is_err());
        assert!(reg.schema("test.missing.v1").is_err());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut reg = TypeHashRegistry::new();
        reg.register_schema(entry("test.sample.v1", &[("id", "bytes32")]))
            .unwrap();
        let err = reg
            .register_schema(entry("test.sample.v1", &[("other", "bool")]))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateSchemaRegistration("test.sample.v1".into())
        );
        // The original entry is untouched.
        assert_eq!(
            reg.schema("test.sample.v1").unwrap().type_signature(),
            "Sample(bytes32 id)"
        );
    }

    #[test]
    fn invalid_schema_is_not_registered() {
        let mut reg = TypeHashRegistry::new();
        let err = reg
            .register_schema(entry("test.sample.v1", &[("id", "uint7")]))
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidFieldType { .. }));
        assert!(reg.is_empty());
    }

    #[test]
    fn empty_message_type_is_rejected() {
        let mut reg = TypeHashRegistry::new();
        assert!(matches!(
            reg.register_schema(entry("  ", &[])),
            Err(RegistryError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn pinned_hash_is_checked() {
        let mut good = entry("test.empty.v1", &[]);
        good.schema.name = "Empty".into();
        good.type_hash =
            Some("0x8850B5F1DC51DB37A04312A95CFE005A41794B757D6D5B92CC69E4947333A6FB".into());

        let mut bad = good.clone();
        bad.message_type = "test.empty.v2".into();
        bad.type_hash = Some("0x00".into());

        let mut reg = TypeHashRegistry::new();
        assert!(reg.register_schema(good).is_ok());
        match reg.register_schema(bad).unwrap_err() {
            RegistryError::TypeHashMismatch {
                message_type,
                expected,
                computed,
            } => {
                assert_eq!(message_type, "test.empty.v2");
                assert_eq!(expected, "0x00");
                assert!(computed.matches_hex(
                    "8850b5f1dc51db37a04312a95cfe005a41794b757d6d5b92cc69e4947333a6fb"
                ));
            }
            other => panic!("expected TypeHashMismatch, got {other:?}"),
        }
    }

    #[test]
    fn iteration_is_in_identifier_order() {
        let reg = TypeHashRegistry::from_catalogue([
            entry("test.zeta.v1", &[]),
            entry("test.alpha.v1", &[]),
            entry("test.mid.v1", &[]),
        ])
        .unwrap();
        let ids: Vec<&str> = reg.iter().map(TypeHashEntry::message_type).collect();
        assert_eq!(ids, ["test.alpha.v1", "test.mid.v1", "test.zeta.v1"]);
    }

    #[test]
    fn builtin_registry_is_a_single_instance() {
        let a = builtin_registry().unwrap();
        let b = builtin_registry().unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.len(), 7);
    }

    #[test]
    fn builtin_registry_is_shared_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    lookup_message_type("agirails.request.v1")
                        .unwrap()
                        .type_hash()
                })
            })
            .collect();
        let hashes: Vec<Digest> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(hashes.windows(2).all(|w| w[0] == w[1]));
    }
}
