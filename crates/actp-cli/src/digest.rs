//! # Digest Subcommand
//!
//! Prints the SHA3-256 digest of a JSON document's canonical form and,
//! with `--expect`, checks it against a reference value.

use std::path::PathBuf;

use actp_core::{sha3_digest, CanonicalBytes, Digest};
use anyhow::{Context, Result};
use clap::Args;

use crate::EXIT_MISMATCH;

/// Arguments for the `actp digest` subcommand.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// JSON document to hash, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Reference digest; exit 1 if the computed digest differs.
    #[arg(long, value_name = "HEX")]
    pub expect: Option<String>,

    /// Print the canonical form before the digest.
    #[arg(long)]
    pub show_canonical: bool,
}

/// Outcome of hashing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestReport {
    /// The canonical form that was hashed.
    pub canonical: String,
    /// Its digest.
    pub digest: Digest,
    /// `Some(true)` when `--expect` matched, `Some(false)` when it did not.
    pub matched: Option<bool>,
}

/// Canonicalize and hash the input without printing anything.
pub fn compute_digest(args: &DigestArgs) -> Result<DigestReport> {
    let value = crate::load_document(&args.input)?;
    let canonical = CanonicalBytes::new(&value)
        .with_context(|| format!("cannot canonicalize {}", args.input.display()))?;
    let digest = sha3_digest(&canonical);
    let matched = args.expect.as_deref().map(|hex| digest.matches_hex(hex));
    Ok(DigestReport {
        canonical: canonical.as_str().to_string(),
        digest,
        matched,
    })
}

/// Execute the digest subcommand.
pub fn run_digest(args: &DigestArgs) -> Result<u8> {
    let report = compute_digest(args)?;

    if args.show_canonical {
        println!("{}", report.canonical);
    }
    println!("{}", report.digest);

    if let Some(expected) = args.expect.as_deref() {
        if let Err(e) = report.digest.verify_hex(expected) {
            println!("FAIL: {e}");
            return Ok(EXIT_MISMATCH);
        }
        tracing::info!(digest = %report.digest, "digest matches reference");
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_REQUEST: &str = r#"{
        "version": "1.0.0",
        "serviceType": "text-generation",
        "requestId": "req_min_001",
        "consumer": "did:ethr:84532:0x1234567890123456789012345678901234567890",
        "provider": "did:ethr:84532:0x0987654321098765432109876543210987654321",
        "chainId": 84532,
        "inputData": { "prompt": "Hello world" },
        "paymentTerms": {
            "amount": "50000",
            "currency": "USDC",
            "decimals": 6,
            "deadline": 1732000000,
            "disputeWindow": 3600
        },
        "timestamp": 1731700000
    }"#;

    const MINIMAL_DIGEST: &str =
        "0x4969f2a08b14d7895599e137a17caed80b28c777e3f23d7ca47c83ad3bf5ec69";

    fn args_for(dir: &tempfile::TempDir, expect: Option<&str>) -> DigestArgs {
        let path = dir.path().join("request.json");
        std::fs::write(&path, MINIMAL_REQUEST).unwrap();
        DigestArgs {
            input: path,
            expect: expect.map(str::to_string),
            show_canonical: false,
        }
    }

    #[test]
    fn computes_published_digest() {
        let dir = tempfile::tempdir().unwrap();
        let report = compute_digest(&args_for(&dir, None)).unwrap();
        assert_eq!(report.digest.to_string(), MINIMAL_DIGEST);
        assert!(report.canonical.starts_with(r#"{"chainId":84532,"consumer":"#));
        assert_eq!(report.matched, None);
    }

    #[test]
    fn expect_match_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let upper = MINIMAL_DIGEST.trim_start_matches("0x").to_uppercase();
        assert_eq!(run_digest(&args_for(&dir, Some(&upper))).unwrap(), 0);
    }

    #[test]
    fn expect_mismatch_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(&dir, Some("0xdeadbeef"));
        assert_eq!(compute_digest(&args).unwrap().matched, Some(false));
        assert_eq!(run_digest(&args).unwrap(), EXIT_MISMATCH);
    }

    #[test]
    fn mismatch_error_names_both_digests() {
        let dir = tempfile::tempdir().unwrap();
        let report = compute_digest(&args_for(&dir, None)).unwrap();
        let err = report.digest.verify_hex(" 0xdeadbeef ").unwrap_err();
        assert!(matches!(err, actp_core::ActpError::Integrity(_)));
        assert_eq!(
            err.to_string(),
            format!("integrity error: digest mismatch: expected 0xdeadbeef, computed {MINIMAL_DIGEST}")
        );
    }

    #[test]
    fn malformed_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let args = DigestArgs {
            input: path,
            expect: None,
            show_canonical: true,
        };
        assert!(run_digest(&args).is_err());
    }
}
