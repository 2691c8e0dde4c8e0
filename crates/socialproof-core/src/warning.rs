use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorKind {
    Ownership,
    Quality,
    Authenticity,
    Uniqueness,
}

/// A recoverable anomaly. The offending item already counts as a failure
/// in its validator's metrics; this only records why.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationWarning {
    pub validator: ValidatorKind,
    pub post_id: Option<String>,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(validator: ValidatorKind, post_id: &str, message: impl Into<String>) -> Self {
        let post_id = if post_id.is_empty() {
            None
        } else {
            Some(post_id.to_string())
        };
        Self {
            validator,
            post_id,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ValidatorKind::Ownership => "ownership",
            ValidatorKind::Quality => "quality",
            ValidatorKind::Authenticity => "authenticity",
            ValidatorKind::Uniqueness => "uniqueness",
        };
        write!(f, "{value}")
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.post_id {
            Some(post_id) => write!(f, "[{}] post {post_id}: {}", self.validator, self.message),
            None => write!(f, "[{}] {}", self.validator, self.message),
        }
    }
}
