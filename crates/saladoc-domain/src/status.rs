//! Document status - where a record sits in its approval workflow

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a registered document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocStatus {
    /// Still being written
    Draft,

    /// Awaiting approval
    Pending,

    /// Approved
    Approved,

    /// Fully processed
    Completed,

    /// Rejected
    Rejected,
}

impl DocStatus {
    /// Every variant, in schema order
    pub const ALL: [DocStatus; 5] = [
        DocStatus::Draft,
        DocStatus::Pending,
        DocStatus::Approved,
        DocStatus::Completed,
        DocStatus::Rejected,
    ];

    /// Wire name of the variant
    pub fn as_str(&self) -> &'static str {
        match self {
            DocStatus::Draft => "Draft",
            DocStatus::Pending => "Pending",
            DocStatus::Approved => "Approved",
            DocStatus::Completed => "Completed",
            DocStatus::Rejected => "Rejected",
        }
    }

    /// Lao display label
    pub fn label_lo(&self) -> &'static str {
        match self {
            DocStatus::Draft => "ຮ່າງ",
            DocStatus::Pending => "ລໍຖ້າອະນຸມັດ",
            DocStatus::Approved => "ອະນຸມັດແລ້ວ",
            DocStatus::Completed => "ສຳເລັດ",
            DocStatus::Rejected => "ປະຕິເສດ",
        }
    }

    /// Parse a status from user input (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Some(DocStatus::Draft),
            "pending" => Some(DocStatus::Pending),
            "approved" => Some(DocStatus::Approved),
            "completed" => Some(DocStatus::Completed),
            "rejected" => Some(DocStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid document status: {}", s))
    }
}
