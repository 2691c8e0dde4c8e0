use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named diagnostic metrics, sorted by name so output is stable.
pub type Attributes = BTreeMap<String, AttributeValue>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Count(u64),
    /// Always within [0, 100].
    Percentage(f64),
}

/// The verdict handed to the network. Field names are part of the wire
/// contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProofResult {
    pub dlp_id: u64,
    pub valid: bool,
    pub score: f64,
    pub authenticity: f64,
    pub ownership: f64,
    pub quality: f64,
    pub uniqueness: f64,
    pub attributes: Attributes,
    pub metadata: ResultMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultMetadata {
    pub dlp_id: u64,
    pub timestamp: String,
}

impl AttributeValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Flag(_) => None,
            AttributeValue::Count(value) => Some(*value as f64),
            AttributeValue::Percentage(value) => Some(*value),
        }
    }
}

impl ProofResult {
    pub fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.attributes.get(name).copied()
    }

    /// Equality ignoring the assembly timestamp.
    pub fn same_verdict(&self, other: &ProofResult) -> bool {
        self.dlp_id == other.dlp_id
            && self.valid == other.valid
            && self.score == other.score
            && self.authenticity == other.authenticity
            && self.ownership == other.ownership
            && self.quality == other.quality
            && self.uniqueness == other.uniqueness
            && self.attributes == other.attributes
            && self.metadata.dlp_id == other.metadata.dlp_id
    }
}
