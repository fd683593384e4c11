//! # actp-eip712 — Message Type Hashes
//!
//! Schema definitions and type hashes for the AGIRAILS ACTP message types:
//!
//! - **Schema** (`schema.rs`): [`SchemaDefinition`], the
//!   `Name(type1 name1,...)` type signature and its SHA3-256 type hash.
//!
//! - **Catalogue** (`catalogue.rs`): the seven built-in message types and the
//!   YAML format for declaring more.
//!
//! - **Registry** (`registry.rs`): [`TypeHashRegistry`] and the process-wide
//!   [`builtin_registry`], looked up by message-type identifier.
//!
//! ## Security Invariant
//!
//! Type hashes are computed from the signature string through
//! `actp_core::digest_raw_string()`. Built-in catalogue entries pin their
//! published hashes and are re-verified when the registry is first built.
//!
//! ## Crate Policy
//!
//! - Depends on `actp-core` internally.
//! - Encoding of struct values and domain separators (signing) lives with the
//!   signer, not here.

#![deny(missing_docs)]

pub mod catalogue;
pub mod error;
pub mod registry;
pub mod schema;

pub use catalogue::{builtin_catalogue, Catalogue};
pub use error::RegistryError;
pub use registry::{
    builtin_registry, lookup_message_type, CatalogueEntry, TypeHashEntry, TypeHashRegistry,
};
pub use schema::{
    eip712_domain_schema, is_elementary_type, Eip712Domain, FieldSpec, SchemaDefinition,
    ACTP_DOMAIN,
};
