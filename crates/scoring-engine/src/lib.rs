use socialproof_core::config::Config;
use socialproof_core::error::ProofError;
use socialproof_core::ids::EvaluationId;
use socialproof_core::types::{Account, Metadata, Post, ReferenceCorpus, Submission};
use socialproof_core::warning::ValidationWarning;
use time::OffsetDateTime;

pub mod aggregate;
mod outcome;
pub mod rules;

pub use aggregate::{ComponentReports, SubScores};
pub use outcome::{AttributeValue, Attributes, ProofResult, ResultMetadata};
pub use rules::authenticity::{verify_authenticity, AuthenticityReport};
pub use rules::ownership::{verify_ownership, OwnershipReport};
pub use rules::quality::{assess_quality, QualityReport};
pub use rules::uniqueness::{assess_uniqueness, UniquenessReport};

/// Scores submissions against a fixed, validated configuration.
#[derive(Debug, Clone)]
pub struct ProofEngine {
    config: Config,
}

/// One finished evaluation: the verdict plus the non-fatal anomalies met on
/// the way.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub result: ProofResult,
    pub warnings: Vec<ValidationWarning>,
}

impl ProofEngine {
    /// Creates an engine, rejecting configurations that cannot score.
    pub fn new(config: Config) -> Result<Self, ProofError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the submission from parsed records and evaluates it.
    /// Fails before any validator runs if identity fields are missing.
    pub fn evaluate_records(
        &self,
        account: Account,
        posts: Vec<Post>,
        metadata: Metadata,
        reference: Option<ReferenceCorpus>,
    ) -> Result<Evaluation, ProofError> {
        let submission = Submission::new(account, posts, metadata, reference)?;
        Ok(self.evaluate(&submission))
    }

    pub fn evaluate(&self, submission: &Submission) -> Evaluation {
        self.evaluate_at(submission, OffsetDateTime::now_utc())
    }

    /// Evaluates with `now` as the reference point for future-date checks.
    pub fn evaluate_at(&self, submission: &Submission, now: OffsetDateTime) -> Evaluation {
        let id = EvaluationId::new();
        let dlp_id = submission.metadata().dlp_id;
        let span = tracing::info_span!("evaluation", %id, dlp_id);
        let _guard = span.enter();

        tracing::info!(
            posts = submission.posts().len(),
            reference = submission.reference().map(|corpus| corpus.len()),
            parallel = self.config.engine.parallel,
            "starting proof generation"
        );

        let reports = if self.config.engine.parallel {
            self.run_parallel(submission, now)
        } else {
            self.run_sequential(submission, now)
        };

        let warnings = reports.authenticity.warnings.clone();
        for warning in &warnings {
            tracing::warn!(%warning, "validation warning");
        }

        let result = aggregate::assemble(&reports, &self.config, dlp_id);
        tracing::info!(score = result.score, valid = result.valid, "proof generated");

        Evaluation {
            id,
            result,
            warnings,
        }
    }

    fn run_sequential(&self, submission: &Submission, now: OffsetDateTime) -> ComponentReports {
        ComponentReports {
            ownership: self.ownership(submission),
            quality: self.quality(submission),
            authenticity: self.authenticity(submission, now),
            uniqueness: self.uniqueness(submission, false),
        }
    }

    fn run_parallel(&self, submission: &Submission, now: OffsetDateTime) -> ComponentReports {
        let ((ownership, quality), (authenticity, uniqueness)) = rayon::join(
            || rayon::join(|| self.ownership(submission), || self.quality(submission)),
            || {
                rayon::join(
                    || self.authenticity(submission, now),
                    || self.uniqueness(submission, true),
                )
            },
        );
        ComponentReports {
            ownership,
            quality,
            authenticity,
            uniqueness,
        }
    }

    fn ownership(&self, submission: &Submission) -> OwnershipReport {
        verify_ownership(submission.account(), submission.posts(), &self.config)
    }

    fn quality(&self, submission: &Submission) -> QualityReport {
        assess_quality(submission.posts(), &self.config.quality)
    }

    fn authenticity(&self, submission: &Submission, now: OffsetDateTime) -> AuthenticityReport {
        verify_authenticity(submission.posts(), &self.config, now)
    }

    /// Skipped entirely without a reference corpus.
    fn uniqueness(&self, submission: &Submission, parallel: bool) -> Option<UniquenessReport> {
        let reference = submission.reference()?;
        Some(assess_uniqueness(
            submission.posts(),
            reference,
            &self.config.uniqueness,
            parallel,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn account() -> Account {
        Account {
            user_id: "u1".to_string(),
            username: "alice".to_string(),
            email: Some("a@x.com".to_string()),
            profile_info: Map::new(),
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = Config::default_config();
        config.weights.ownership = 0.9;
        let err = ProofEngine::new(config).unwrap_err();
        assert!(matches!(err, ProofError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_user_id_produces_no_result() {
        let engine = ProofEngine::new(Config::default_config()).unwrap();
        let mut account = account();
        account.user_id = String::new();
        let err = engine
            .evaluate_records(account, Vec::new(), Metadata::new(1), None)
            .unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_accepted_config_never_panics_on_large_skew() {
        let mut config = Config::default_config();
        config.authenticity.clock_skew_secs = i64::MAX / 2;
        let engine = ProofEngine::new(config).unwrap();
        let posts = vec![Post::new("p1", "u1", "X", "https://x.com/alice/status/1")
            .with_posted_at("2026-10-01T09:00:00Z")];
        let evaluation = engine
            .evaluate_records(account(), posts, Metadata::new(1), None)
            .unwrap();
        assert_eq!(evaluation.result.authenticity, 1.0);
    }

    #[test]
    fn test_warnings_surface_on_evaluation() {
        let engine = ProofEngine::new(Config::default_config()).unwrap();
        let posts = vec![Post::new("p1", "u1", "X", "https://x.com/alice/status/1")
            .with_posted_at("not a date")];
        let evaluation = engine
            .evaluate_records(account(), posts, Metadata::new(1), None)
            .unwrap();
        assert_eq!(evaluation.warnings.len(), 1);
        assert_eq!(evaluation.warnings[0].post_id.as_deref(), Some("p1"));
    }
}
