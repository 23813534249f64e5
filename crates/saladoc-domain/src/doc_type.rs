//! Document type - the kind of correspondence a record represents

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a registered document
///
/// Serialized with the English variant names, which are also the values the
/// extraction schema allows the model to emit. Deserialization is strict: any
/// other string is rejected rather than mapped to [`DocType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    /// Received from outside the office
    Incoming,

    /// Sent out of the office
    Outgoing,

    /// Circulated within the office
    Internal,

    /// Contract or agreement
    Contract,

    /// Anything else
    Other,
}

impl DocType {
    /// Every variant, in schema order
    pub const ALL: [DocType; 5] = [
        DocType::Incoming,
        DocType::Outgoing,
        DocType::Internal,
        DocType::Contract,
        DocType::Other,
    ];

    /// Wire name of the variant
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Incoming => "Incoming",
            DocType::Outgoing => "Outgoing",
            DocType::Internal => "Internal",
            DocType::Contract => "Contract",
            DocType::Other => "Other",
        }
    }

    /// Lao display label
    pub fn label_lo(&self) -> &'static str {
        match self {
            DocType::Incoming => "ຂາເຂົ້າ",
            DocType::Outgoing => "ຂາອອກ",
            DocType::Internal => "ພາຍໃນ",
            DocType::Contract => "ສັນຍາ",
            DocType::Other => "ອື່ນໆ",
        }
    }

    /// Parse a type from user input (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "incoming" => Some(DocType::Incoming),
            "outgoing" => Some(DocType::Outgoing),
            "internal" => Some(DocType::Internal),
            "contract" => Some(DocType::Contract),
            "other" => Some(DocType::Other),
            _ => None,
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid document type: {}", s))
    }
}
