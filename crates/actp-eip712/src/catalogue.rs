//! # Message-Type Catalogue
//!
//! The seven AGIRAILS message types and the file format for extending them.
//!
//! Each built-in entry pins its published type hash, so building the
//! [`builtin_registry`](crate::registry::builtin_registry) re-derives and checks
//! every one of them.
//!
//! ## File Format
//!
//! Catalogue files are YAML (JSON is accepted too, being a YAML subset):
//!
//! ```yaml
//! schemas:
//!   - message_type: acme.invoice.v1
//!     version_label: ACME-1
//!     type_hash: "0x..."        # optional; checked when present
//!     schema:
//!       name: Invoice
//!       fields:
//!         - { name: invoiceId, type: bytes32 }
//!         - { name: amount, type: uint256 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::registry::CatalogueEntry;
use crate::schema::SchemaDefinition;

/// `agirails.notification.v1` (AIP-0.1).
pub const NOTIFICATION_V1: &str = "agirails.notification.v1";
/// `agirails.request.v1` (AIP-1).
pub const REQUEST_V1: &str = "agirails.request.v1";
/// `agirails.quote.v1` (AIP-2).
pub const QUOTE_V1: &str = "agirails.quote.v1";
/// `agirails.discovery.v1` (AIP-3).
pub const DISCOVERY_V1: &str = "agirails.discovery.v1";
/// `agirails.delivery.v1` (AIP-4).
pub const DELIVERY_V1: &str = "agirails.delivery.v1";
/// `agirails.dispute.v1` (AIP-5).
pub const DISPUTE_V1: &str = "agirails.dispute.v1";
/// `agirails.resolution.v1` (AIP-6).
pub const RESOLUTION_V1: &str = "agirails.resolution.v1";

/// An ordered list of catalogue entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalogue {
    /// Entries in registration order.
    #[serde(default)]
    pub schemas: Vec<CatalogueEntry>,
}

impl Catalogue {
    /// Parse a catalogue document.
    pub fn from_yaml_str(source: &str) -> Result<Self, RegistryError> {
        Self::parse(source, "<inline>")
    }

    /// Read and parse a catalogue file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Catalogue {
            origin: origin.clone(),
            reason: format!("cannot read file: {e}"),
        })?;
        let catalogue = Self::parse(&content, &origin)?;
        tracing::debug!(path = %origin, schemas = catalogue.schemas.len(), "loaded catalogue");
        Ok(catalogue)
    }

    fn parse(source: &str, origin: &str) -> Result<Self, RegistryError> {
        serde_yaml::from_str(source).map_err(|e| RegistryError::Catalogue {
            origin: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// Append another catalogue's entries after this one's.
    pub fn extend(&mut self, other: Catalogue) {
        self.schemas.extend(other.schemas);
    }
}

/// The built-in AGIRAILS catalogue.
pub fn builtin_catalogue() -> Catalogue {
    Catalogue {
        schemas: vec![
            entry(
                NOTIFICATION_V1,
                "AIP-0.1",
                "Notification",
                &[
                    ("type", "string"),
                    ("version", "string"),
                    ("txId", "bytes32"),
                    ("cid", "string"),
                    ("consumer", "string"),
                    ("provider", "string"),
                    ("chainId", "uint256"),
                    ("timestamp", "uint256"),
                    ("nonce", "uint256"),
                ],
                "0xa02f2574276a8ca75bfdad3fc381f36324358b535685db9f507708ee9490c8e9",
            ),
            entry(
                REQUEST_V1,
                "AIP-1",
                "Request",
                &[
                    ("version", "string"),
                    ("serviceType", "string"),
                    ("requestId", "string"),
                    ("consumer", "string"),
                    ("provider", "string"),
                    ("chainId", "uint256"),
                    ("inputDataHash", "bytes32"),
                    ("amount", "uint256"),
                    ("deadline", "uint256"),
                    ("disputeWindow", "uint256"),
                    ("timestamp", "uint256"),
                    ("nonce", "uint256"),
                ],
                "0x445f1b6560f0d4302d32fa3677ce3a4130fcd347b333c333f78e2725d42b12c7",
            ),
            entry(
                QUOTE_V1,
                "AIP-2",
                "QuoteRequest",
                &[
                    ("from", "string"),
                    ("to", "string"),
                    ("timestamp", "uint256"),
                    ("nonce", "bytes32"),
                    ("serviceType", "string"),
                    ("requirements", "string"),
                    ("deadline", "uint256"),
                    ("disputeWindow", "uint256"),
                ],
                "0x3a250619f2f54b815ae7a1b3219f8a958f9cde40186233bee134b4b9d7095407",
            ),
            entry(
                DISCOVERY_V1,
                "AIP-3",
                "Discovery",
                &[
                    ("from", "string"),
                    ("serviceType", "string"),
                    ("minReputation", "uint256"),
                    ("maxPrice", "uint256"),
                    ("requiredCapabilities", "string"),
                    ("chainId", "uint256"),
                    ("timestamp", "uint256"),
                    ("nonce", "uint256"),
                ],
                "0x34e59475223edfc59d786cb2f8c921a61f2bf4cf7f64bc28b847f9448d16e7a2",
            ),
            entry(
                DELIVERY_V1,
                "AIP-4",
                "DeliveryProof",
                &[
                    ("txId", "bytes32"),
                    ("provider", "string"),
                    ("consumer", "string"),
                    ("resultCID", "string"),
                    ("resultHash", "bytes32"),
                    ("easAttestationUID", "bytes32"),
                    ("deliveredAt", "uint256"),
                    ("chainId", "uint256"),
                    ("nonce", "uint256"),
                ],
                "0x7974f677eb16e762b690ee2ec91d75e28a770e2a1ea6fea824eddff6ea9a855b",
            ),
            entry(
                DISPUTE_V1,
                "AIP-5",
                "Dispute",
                &[
                    ("txId", "bytes32"),
                    ("consumer", "string"),
                    ("provider", "string"),
                    ("reason", "string"),
                    ("evidenceCID", "string"),
                    ("evidenceHash", "bytes32"),
                    ("chainId", "uint256"),
                    ("timestamp", "uint256"),
                    ("nonce", "uint256"),
                ],
                "0x118a9fe5aef5b766734aa976f70c90a40c4c1144c599a0405a60c18199f9ee66",
            ),
            entry(
                RESOLUTION_V1,
                "AIP-6",
                "Resolution",
                &[
                    ("txId", "bytes32"),
                    ("mediator", "string"),
                    ("consumer", "string"),
                    ("provider", "string"),
                    ("ruling", "string"),
                    ("consumerShare", "uint256"),
                    ("providerShare", "uint256"),
                    ("reasoning", "string"),
                    ("chainId", "uint256"),
                    ("timestamp", "uint256"),
                    ("nonce", "uint256"),
                ],
                "0x4312d59902c52428cc3c348e24d4b7b3922b50e0e2c9f8a16ee504f5ec6d1fc2",
            ),
        ],
    }
}

fn entry(
    message_type: &str,
    version_label: &str,
    name: &str,
    fields: &[(&str, &str)],
    type_hash: &str,
) -> CatalogueEntry {
    CatalogueEntry {
        message_type: message_type.to_string(),
        version_label: version_label.to_string(),
        schema: SchemaDefinition::new(name, fields.iter().copied()),
        type_hash: Some(type_hash.to_string()),
    }
}
