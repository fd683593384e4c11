//! # Vectors Subcommand
//!
//! Recomputes the published AIP-1 request-metadata test vectors and compares
//! each digest with its pinned value. Any mismatch means this build would
//! disagree with the other ACTP SDKs.

use actp_core::{sha3_digest, CanonicalBytes, StructuredValue};
use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use crate::EXIT_MISMATCH;

/// Arguments for the `actp vectors` subcommand.
#[derive(Args, Debug)]
pub struct VectorsArgs {
    /// Print the canonical form of each vector.
    #[arg(long)]
    pub show_canonical: bool,
}

/// A named input with its published digest.
#[derive(Debug, Clone)]
pub struct TestVector {
    /// Short name for reports.
    pub name: &'static str,
    /// Request metadata.
    pub input: serde_json::Value,
    /// Published `0x` digest.
    pub expected: &'static str,
}

fn base_sepolia_request(
    request_id: &str,
    prompt: &str,
    amount: &str,
) -> serde_json::Value {
    json!({
        "version": "1.0.0",
        "serviceType": "text-generation",
        "requestId": request_id,
        "consumer": "did:ethr:84532:0x1234567890123456789012345678901234567890",
        "provider": "did:ethr:84532:0x0987654321098765432109876543210987654321",
        "chainId": 84532,
        "inputData": { "prompt": prompt },
        "paymentTerms": {
            "amount": amount,
            "currency": "USDC",
            "decimals": 6,
            "deadline": 1732000000,
            "disputeWindow": 3600
        },
        "timestamp": 1731700000
    })
}

/// The published vectors, in report order.
pub fn published_vectors() -> Vec<TestVector> {
    let mut max_price = base_sepolia_request("req_edge_001", "Test", "5000000");
    max_price["paymentTerms"]["maxPrice"] = json!("5000000");

    vec![
        TestVector {
            name: "minimal-request",
            input: base_sepolia_request("req_min_001", "Hello world", "50000"),
            expected: "0x4969f2a08b14d7895599e137a17caed80b28c777e3f23d7ca47c83ad3bf5ec69",
        },
        TestVector {
            name: "key-sorting",
            input: json!({ "z": 1, "a": 2, "m": { "y": 3, "x": 4 } }),
            expected: "0xb848ad1ba24cced1a1b835adfd3164d77b3fcb4e11eacc18d313d529aca02e81",
        },
        TestVector {
            name: "number-formatting",
            input: json!({ "integer": 42, "float": 3.141592653589793 }),
            expected: "0xcfb6b25ad4c7d62a3d1c3c2f252e075146eed757a57985205ab15053558d330b",
        },
        TestVector {
            name: "full-featured-request",
            input: json!({
                "version": "1.0.0",
                "serviceType": "code-generation",
                "requestId": "req_full_002",
                "consumer": "did:ethr:84532:0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb",
                "provider": "did:ethr:84532:0x8f4e7d2a9c1b5e3f6a8d2c4e1f7b9a3d5c8e2f6a",
                "chainId": 84532,
                "inputData": {
                    "language": "python",
                    "task": "Create a REST API for user authentication",
                    "framework": "FastAPI",
                    "includeTests": true
                },
                "deliveryRequirements": {
                    "format": "url",
                    "schema": "https://schema.agirails.io/code-delivery-v1.json",
                    "minQuality": 0.9,
                    "maxLatency": 300
                },
                "paymentTerms": {
                    "amount": "50000000",
                    "currency": "USDC",
                    "decimals": 6,
                    "maxPrice": "100000000",
                    "deadline": 1732200000,
                    "disputeWindow": 14400
                },
                "metadata": {
                    "priority": "high",
                    "callbackUrl": "https://consumer.example.com/webhooks/delivery",
                    "tags": ["code", "python", "api"]
                },
                "timestamp": 1731700000
            }),
            expected: "0x71d9914bac1b7af889983b918c753fe1c686a0cbae36889bbb45b4523eb1e69f",
        },
        TestVector {
            name: "max-price-edge-case",
            input: max_price,
            expected: "0xa10b7733d4a1b9ebf98ede7ece435fbe4e58cc96ee9d35e21e0007c0756aaa89",
        },
        TestVector {
            name: "base-mainnet-request",
            input: json!({
                "version": "1.0.0",
                "serviceType": "text-generation",
                "requestId": "req_mainnet_001",
                "consumer": "did:ethr:8453:0x1234567890123456789012345678901234567890",
                "provider": "did:ethr:8453:0x0987654321098765432109876543210987654321",
                "chainId": 8453,
                "inputData": { "prompt": "Production request" },
                "paymentTerms": {
                    "amount": "1000000",
                    "currency": "USDC",
                    "decimals": 6,
                    "deadline": 1732000000,
                    "disputeWindow": 7200
                },
                "timestamp": 1731700000
            }),
            expected: "0xcc6c1199732bc876691623ffb88e8c8bce3e312161126724ee124bbd0ed073f3",
        },
        TestVector {
            name: "cross-language-request",
            input: base_sepolia_request("req_cross_lang_001", "Hello", "1000000"),
            expected: "0xf769c6c0e3c3c914e1a2b192e853170e250861328c39dbe96b254affd75c1b46",
        },
    ]
}

/// Result of checking one vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorOutcome {
    /// Vector name.
    pub name: &'static str,
    /// Canonical form that was hashed.
    pub canonical: String,
    /// Computed digest, `0x`-prefixed.
    pub computed: String,
    /// Whether it equals the published digest.
    pub passed: bool,
}

/// Canonicalize and hash one vector.
pub fn check_vector(vector: &TestVector) -> Result<VectorOutcome> {
    let value = StructuredValue::from(vector.input.clone());
    let canonical = CanonicalBytes::new(&value)
        .with_context(|| format!("vector {} has no canonical form", vector.name))?;
    let digest = sha3_digest(&canonical);
    Ok(VectorOutcome {
        name: vector.name,
        canonical: canonical.as_str().to_string(),
        computed: digest.to_string(),
        passed: digest.matches_hex(vector.expected),
    })
}

/// Execute the vectors subcommand.
pub fn run_vectors(args: &VectorsArgs) -> Result<u8> {
    let mut failures = 0usize;
    let vectors = published_vectors();

    for vector in &vectors {
        let outcome = check_vector(vector)?;
        if args.show_canonical {
            println!("{}: {}", outcome.name, outcome.canonical);
        }
        if outcome.passed {
            println!("OK: {} {}", outcome.name, outcome.computed);
        } else {
            failures += 1;
            println!(
                "FAIL: {} expected {}, computed {}",
                outcome.name, vector.expected, outcome.computed
            );
        }
    }

    tracing::info!(total = vectors.len(), failures, "test vectors checked");
    if failures == 0 {
        Ok(0)
    } else {
        Ok(EXIT_MISMATCH)
    }
}
