//! # actp-cli — ACTP Digest Command-Line Interface
//!
//! Command-line access to the canonicalizer, digest oracle and type hash
//! registry, for checking metadata digests by hand and in CI.
//!
//! ## Subcommands
//!
//! - `canonicalize` — print the canonical form of a JSON document
//! - `digest` — print (and optionally check) a document's SHA3-256 digest
//! - `type-hash` — print message type signatures and type hashes
//! - `vectors` — recompute the published test vectors
//!
//! ## Exit Codes
//!
//! `0` success, `1` a digest did not match its reference, `2` the command
//! could not run (unreadable input, malformed JSON, unknown message type).
//!
//! ## Crate Policy
//!
//! - Handlers return `anyhow::Result<u8>`; the binary maps errors to exit code 2.
//! - Results go to stdout, logs go to stderr.

pub mod canonicalize;
pub mod config;
pub mod digest;
pub mod typehash;
pub mod vectors;

use std::io::Read;
use std::path::Path;

use actp_core::StructuredValue;
use anyhow::{Context, Result};

/// Exit code for a verification mismatch.
pub const EXIT_MISMATCH: u8 = 1;

/// Exit code for an operational failure.
pub const EXIT_ERROR: u8 = 2;

/// Read a whole input, where `-` means stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Parse JSON text into a [`StructuredValue`].
///
/// Integers that fit `i64`/`u64` stay integers; every other number is a float.
pub fn parse_document(text: &str, origin: &Path) -> Result<StructuredValue> {
    let json: serde_json::Value = serde_json::from_str(text)
        .with_context(|| format!("failed to parse JSON: {}", origin.display()))?;
    Ok(StructuredValue::from(json))
}

/// [`read_input`] followed by [`parse_document`].
pub fn load_document(path: &Path) -> Result<StructuredValue> {
    let text = read_input(path)?;
    let value = parse_document(&text, path)?;
    tracing::debug!(input = %path.display(), kind = value.kind(), "loaded document");
    Ok(value)
}
