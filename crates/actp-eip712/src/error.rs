//! # Registry Errors
//!
//! Failures while defining schemas, loading catalogues and resolving message
//! types. All variants are cheap to clone so the process-wide registry can
//! hand the same initialization failure to every caller.

use actp_core::Digest;
use thiserror::Error;

/// Errors raised by schema validation, catalogue loading and registry lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No schema is registered under the requested message-type identifier.
    #[error("unknown message type: \"{0}\"")]
    UnknownMessageType(String),

    /// A message-type identifier was registered twice.
    #[error("message type \"{0}\" is already registered")]
    DuplicateSchemaRegistration(String),

    /// A field declares a type that is not an ABI elementary type.
    #[error("schema {schema}: field \"{field}\" has non-elementary type \"{field_type}\"")]
    InvalidFieldType {
        /// Schema name.
        schema: String,
        /// Offending field name.
        field: String,
        /// The rejected type string.
        field_type: String,
    },

    /// The schema itself is malformed (empty or non-identifier names, repeated fields).
    #[error("invalid schema \"{schema}\": {reason}")]
    InvalidSchema {
        /// Schema name as given.
        schema: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A catalogue pins a type hash that the schema signature does not produce.
    #[error("type hash mismatch for {message_type}: catalogue pins {expected}, signature hashes to {computed}")]
    TypeHashMismatch {
        /// Message-type identifier.
        message_type: String,
        /// Pinned value from the catalogue.
        expected: String,
        /// Digest of the schema's type signature.
        computed: Digest,
    },

    /// A catalogue could not be read or parsed.
    #[error("invalid catalogue {origin}: {reason}")]
    Catalogue {
        /// File path, or `<inline>` for in-memory sources.
        origin: String,
        /// Read or parse failure.
        reason: String,
    },
}
