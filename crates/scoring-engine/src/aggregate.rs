//! Combines validator reports into the final verdict.

use socialproof_core::config::{AggregateWeights, Config};
use socialproof_core::time::format_timestamp;
use time::OffsetDateTime;

use crate::outcome::{AttributeValue, Attributes, ProofResult, ResultMetadata};
use crate::rules::authenticity::AuthenticityReport;
use crate::rules::clamp_unit;
use crate::rules::ownership::OwnershipReport;
use crate::rules::quality::QualityReport;
use crate::rules::uniqueness::UniquenessReport;
use crate::rules::ComponentReport;

/// Sub-scores entering the weighted mean. Uniqueness only takes part when
/// a reference corpus was supplied; otherwise its weight is spread over the
/// other three instead of counting as a zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubScores {
    WithUniqueness {
        ownership: f64,
        quality: f64,
        authenticity: f64,
        uniqueness: f64,
    },
    WithoutUniqueness {
        ownership: f64,
        quality: f64,
        authenticity: f64,
    },
}

/// Everything the validators produced for one submission.
#[derive(Debug, Clone)]
pub struct ComponentReports {
    pub ownership: OwnershipReport,
    pub quality: QualityReport,
    pub authenticity: AuthenticityReport,
    pub uniqueness: Option<UniquenessReport>,
}

impl SubScores {
    pub fn combine(&self, weights: &AggregateWeights) -> f64 {
        let weighted = match *self {
            SubScores::WithUniqueness {
                ownership,
                quality,
                authenticity,
                uniqueness,
            } => {
                let [w_own, w_qual, w_auth, w_uniq] = weights.with_uniqueness();
                w_own * ownership + w_qual * quality + w_auth * authenticity + w_uniq * uniqueness
            }
            SubScores::WithoutUniqueness {
                ownership,
                quality,
                authenticity,
            } => {
                let [w_own, w_qual, w_auth] = weights.without_uniqueness();
                w_own * ownership + w_qual * quality + w_auth * authenticity
            }
        };
        clamp_unit(weighted)
    }

    pub fn uniqueness(&self) -> Option<f64> {
        match *self {
            SubScores::WithUniqueness { uniqueness, .. } => Some(uniqueness),
            SubScores::WithoutUniqueness { .. } => None,
        }
    }
}

impl ComponentReports {
    pub fn sub_scores(&self) -> SubScores {
        let ownership = self.ownership.score();
        let quality = self.quality.score();
        let authenticity = self.authenticity.score();
        match &self.uniqueness {
            Some(report) => SubScores::WithUniqueness {
                ownership,
                quality,
                authenticity,
                uniqueness: report.score(),
            },
            None => SubScores::WithoutUniqueness {
                ownership,
                quality,
                authenticity,
            },
        }
    }

    /// Flat attribute map across all validators that ran.
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        let reports: [Option<&dyn ComponentReport>; 4] = [
            Some(&self.ownership),
            Some(&self.quality),
            Some(&self.authenticity),
            self.uniqueness.as_ref().map(|report| report as &dyn ComponentReport),
        ];
        for report in reports.into_iter().flatten() {
            for (name, value) in report.attributes() {
                attributes.insert(name.to_string(), value);
            }
        }
        attributes.insert(
            "uniqueness_evaluated".to_string(),
            AttributeValue::Flag(self.uniqueness.is_some()),
        );
        attributes
    }
}

/// Builds the immutable result; the timestamp is taken here.
pub fn assemble(reports: &ComponentReports, config: &Config, dlp_id: u64) -> ProofResult {
    let sub_scores = reports.sub_scores();
    let score = sub_scores.combine(&config.weights);
    let valid = score >= config.proof.acceptance_threshold;

    ProofResult {
        dlp_id,
        valid,
        score,
        authenticity: reports.authenticity.score,
        ownership: reports.ownership.score,
        quality: reports.quality.score,
        uniqueness: sub_scores.uniqueness().unwrap_or(0.0),
        attributes: reports.attributes(),
        metadata: ResultMetadata {
            dlp_id,
            timestamp: format_timestamp(OffsetDateTime::now_utc()),
        },
    }
}
