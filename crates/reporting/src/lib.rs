use serde::{Deserialize, Serialize};

use scoring_engine::{Evaluation, ProofResult};
use socialproof_core::ids::EvaluationId;
use socialproof_core::warning::{ValidationWarning, ValidatorKind};

pub mod human;
pub mod json;
pub mod redact;
pub mod timeline;
pub mod writer;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportStats {
    pub total_warnings: u32,
    pub ownership: u32,
    pub quality: u32,
    pub authenticity: u32,
    pub uniqueness: u32,
}

/// A finished evaluation as presented to operators. Only `result` goes on
/// the wire; the rest is for the console and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofReport {
    pub evaluation_id: EvaluationId,
    pub result: ProofResult,
    pub warnings: Vec<ValidationWarning>,
    pub stats: ReportStats,
}

impl ProofReport {
    pub fn new(evaluation: Evaluation) -> Self {
        let stats = ReportStats::from_warnings(&evaluation.warnings);
        Self {
            evaluation_id: evaluation.id,
            result: evaluation.result,
            warnings: evaluation.warnings,
            stats,
        }
    }

    pub fn human_summary(&self) -> String {
        let mut lines = human::summary_lines(&self.result);
        match self.stats.total_warnings {
            0 => lines.push("No validation warnings.".to_string()),
            1 => lines.push("1 validation warning.".to_string()),
            count => lines.push(format!("{count} validation warnings.")),
        }
        lines.join("\n")
    }
}

impl ReportStats {
    pub fn from_warnings(warnings: &[ValidationWarning]) -> Self {
        let mut stats = ReportStats::default();
        for warning in warnings {
            stats.total_warnings = stats.total_warnings.saturating_add(1);
            let counter = match warning.validator {
                ValidatorKind::Ownership => &mut stats.ownership,
                ValidatorKind::Quality => &mut stats.quality,
                ValidatorKind::Authenticity => &mut stats.authenticity,
                ValidatorKind::Uniqueness => &mut stats.uniqueness,
            };
            *counter = counter.saturating_add(1);
        }
        stats
    }
}
