//! # Type-Hash Subcommand
//!
//! Prints the type signature and type hash of registered message types,
//! resolved against the built-in registry plus any configured catalogue.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use actp_eip712::{TypeHashEntry, TypeHashRegistry};

use crate::config::CliConfig;

/// Arguments for the `actp type-hash` subcommand.
#[derive(Args, Debug)]
pub struct TypeHashArgs {
    /// Message-type identifier, e.g. `agirails.request.v1`.
    #[arg(value_name = "MESSAGE_TYPE", conflicts_with = "all")]
    pub message_type: Option<String>,

    /// List every registered message type.
    #[arg(long)]
    pub all: bool,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// One row of `type-hash` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeHashRow {
    /// Message-type identifier.
    pub message_type: String,
    /// Version label.
    pub version_label: String,
    /// `Name(type name,...)`.
    pub type_signature: String,
    /// `0x`-prefixed type hash.
    pub type_hash: String,
}

impl From<&TypeHashEntry> for TypeHashRow {
    fn from(entry: &TypeHashEntry) -> Self {
        Self {
            message_type: entry.message_type().to_string(),
            version_label: entry.version_label().to_string(),
            type_signature: entry.type_signature(),
            type_hash: entry.type_hash().to_string(),
        }
    }
}

/// Select the rows a `type-hash` invocation asks for.
pub fn select_rows(args: &TypeHashArgs, registry: &TypeHashRegistry) -> Result<Vec<TypeHashRow>> {
    match (&args.message_type, args.all) {
        (Some(id), _) => Ok(vec![TypeHashRow::from(registry.lookup(id)?)]),
        (None, true) => Ok(registry.iter().map(TypeHashRow::from).collect()),
        (None, false) => bail!("specify a message type or --all"),
    }
}

/// Execute the type-hash subcommand.
pub fn run_type_hash(args: &TypeHashArgs, config: &CliConfig) -> Result<u8> {
    let registry = config.registry()?;
    let rows = select_rows(args, &registry)?;

    if args.json {
        let out = if args.all {
            serde_json::to_string_pretty(&rows)?
        } else {
            serde_json::to_string_pretty(&rows[0])?
        };
        println!("{out}");
        return Ok(0);
    }

    for row in &rows {
        println!("{}  {}  {}", row.message_type, row.version_label, row.type_hash);
        println!("    {}", row.type_signature);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actp_eip712::builtin_registry;

    fn args(message_type: Option<&str>, all: bool) -> TypeHashArgs {
        TypeHashArgs {
            message_type: message_type.map(str::to_string),
            all,
            json: false,
        }
    }

    #[test]
    fn single_row() {
        let registry = builtin_registry().unwrap();
        let rows = select_rows(&args(Some("agirails.dispute.v1"), false), registry).unwrap();
        assert_eq!(
            rows,
            [TypeHashRow {
                message_type: "agirails.dispute.v1".into(),
                version_label: "AIP-5".into(),
                type_signature: "Dispute(bytes32 txId,string consumer,string provider,\
                                 string reason,string evidenceCID,bytes32 evidenceHash,\
                                 uint256 chainId,uint256 timestamp,uint256 nonce)"
                    .into(),
                type_hash: "0x118a9fe5aef5b766734aa976f70c90a40c4c1144c599a0405a60c18199f9ee66"
                    .into(),
            }]
        );
    }

    #[test]
    fn all_rows() {
        let registry = builtin_registry().unwrap();
        let rows = select_rows(&args(None, true), registry).unwrap();
        assert_eq!(rows.len(), 7);
    }

    #[test]
    fn unknown_type_is_an_error() {
        let registry = builtin_registry().unwrap();
        let err = select_rows(&args(Some("agirails.unknown.v1"), false), registry).unwrap_err();
        assert!(err.to_string().contains("unknown message type"));
    }

    #[test]
    fn nothing_selected_is_an_error() {
        let registry = builtin_registry().unwrap();
        assert!(select_rows(&args(None, false), registry).is_err());
    }

    #[test]
    fn row_serializes_camel_case() {
        let registry = builtin_registry().unwrap();
        let rows = select_rows(&args(Some("agirails.quote.v1"), false), registry).unwrap();
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["messageType"], "agirails.quote.v1");
        assert_eq!(json["versionLabel"], "AIP-2");
        assert!(json["typeSignature"]
            .as_str()
            .unwrap()
            .starts_with("QuoteRequest(string from,string to,"));
    }
}
