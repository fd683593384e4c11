//! # Canonicalize Subcommand
//!
//! Prints the canonical form of a JSON document, the exact string whose
//! UTF-8 bytes are hashed by `actp digest`.

use std::path::PathBuf;

use actp_core::canonicalize;
use anyhow::{Context, Result};
use clap::Args;

/// Arguments for the `actp canonicalize` subcommand.
#[derive(Args, Debug)]
pub struct CanonicalizeArgs {
    /// JSON document to canonicalize, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

/// Execute the canonicalize subcommand.
pub fn run_canonicalize(args: &CanonicalizeArgs) -> Result<u8> {
    let value = crate::load_document(&args.input)?;
    let canonical = canonicalize(&value)
        .with_context(|| format!("cannot canonicalize {}", args.input.display()))?;
    println!("{canonical}");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{ "z": 1, "a": { "y": 0.5, "x": "é" } }"#).unwrap();
        assert_eq!(run_canonicalize(&CanonicalizeArgs { input: path }).unwrap(), 0);
    }

    #[test]
    fn unreadable_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = CanonicalizeArgs {
            input: dir.path().join("missing.json"),
        };
        assert!(run_canonicalize(&args).is_err());
    }
}
