use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use reporting::redact::{redact_email, redact_path};
use reporting::timeline::timeline;
use reporting::writer::write_result;
use reporting::ProofReport;
use scoring_engine::ProofEngine;
use socialproof_core::config::Config;
use socialproof_core::loader::load_submission;

pub struct RunInputs {
    pub config_path: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub dlp_id: Option<u64>,
    pub email: Option<String>,
    pub sequential: bool,
}

pub fn execute(inputs: RunInputs) -> Result<()> {
    let mut config = super::config::load_effective(inputs.config_path.clone())?;
    apply_overrides(&mut config, &inputs);
    let engine = ProofEngine::new(config)?;

    let (input, output) = resolve_dirs(inputs.input, inputs.output);
    tracing::info!(
        input = %redact_path(&input),
        output = %redact_path(&output),
        "using data directories"
    );

    let submission = load_submission(&input, engine.config().proof.dlp_id)
        .with_context(|| format!("load submission from {}", input.display()))?;
    let report = ProofReport::new(engine.evaluate(&submission));

    for line in timeline(&report.warnings) {
        tracing::debug!("{line}");
    }
    write_result(&output, &report.result)?;
    println!("{}", report.human_summary());
    Ok(())
}

/// Flags and environment variables take precedence over the config file.
fn apply_overrides(config: &mut Config, inputs: &RunInputs) {
    if let Some(dlp_id) = inputs.dlp_id {
        config.proof.dlp_id = dlp_id;
    }
    if let Some(email) = inputs.email.as_deref().map(str::trim) {
        if !email.is_empty() {
            tracing::info!(email = %redact_email(email), "claimed email set");
            config.proof.claimed_email = Some(email.to_string());
        }
    }
    if inputs.sequential {
        config.engine.parallel = false;
    }
}

/// Explicit paths win. Otherwise `./input` and `./output` are used when
/// both exist under the working directory, else `/input` and `/output`.
fn resolve_dirs(input: Option<PathBuf>, output: Option<PathBuf>) -> (PathBuf, PathBuf) {
    let (default_input, default_output) = default_dirs(Path::new("."));
    (
        input.unwrap_or(default_input),
        output.unwrap_or(default_output),
    )
}

fn default_dirs(base: &Path) -> (PathBuf, PathBuf) {
    let local_input = base.join("input");
    let local_output = base.join("output");
    if local_input.is_dir() && local_output.is_dir() {
        (local_input, local_output)
    } else {
        (PathBuf::from("/input"), PathBuf::from("/output"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn inputs() -> RunInputs {
        RunInputs {
            config_path: None,
            input: None,
            output: None,
            dlp_id: None,
            email: None,
            sequential: false,
        }
    }

    #[test]
    fn test_local_dirs_need_both() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("input")).unwrap();
        assert_eq!(
            default_dirs(dir.path()),
            (PathBuf::from("/input"), PathBuf::from("/output"))
        );

        fs::create_dir(dir.path().join("output")).unwrap();
        assert_eq!(
            default_dirs(dir.path()),
            (dir.path().join("input"), dir.path().join("output"))
        );
    }

    #[test]
    fn test_explicit_dirs_win() {
        let (input, output) = resolve_dirs(Some(PathBuf::from("a")), Some(PathBuf::from("b")));
        assert_eq!(input, PathBuf::from("a"));
        assert_eq!(output, PathBuf::from("b"));
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let mut config = Config::default_config();
        let mut inputs = inputs();
        inputs.dlp_id = Some(7);
        inputs.email = Some(" a@x.com ".to_string());
        inputs.sequential = true;

        apply_overrides(&mut config, &inputs);
        assert_eq!(config.proof.dlp_id, 7);
        assert_eq!(config.proof.claimed_email.as_deref(), Some("a@x.com"));
        assert!(!config.engine.parallel);
    }

    #[test]
    fn test_blank_email_is_ignored() {
        let mut config = Config::default_config();
        let mut inputs = inputs();
        inputs.email = Some("   ".to_string());
        apply_overrides(&mut config, &inputs);
        assert_eq!(config.proof.claimed_email, None);
    }

    #[test]
    fn test_run_writes_results() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        fs::create_dir(&input).unwrap();
        fs::write(
            input.join("account.json"),
            r#"{"user_id": "u1", "username": "alice", "email": "a@x.com"}"#,
        )
        .unwrap();
        fs::write(
            input.join("posts.json"),
            r#"[{"post_id": "1", "user_id": "u1", "platform": "X",
                "post_url": "https://x.com/alice/status/1", "content": "hello world",
                "posted_at": "2026-01-01T09:00:00Z",
                "engagement": {"likes": 10, "views": 100}}]"#,
        )
        .unwrap();
        let config_path = dir.path().join("config.toml");
        Config::default_config().save(&config_path).unwrap();

        let mut inputs = inputs();
        inputs.config_path = Some(config_path);
        inputs.input = Some(input);
        inputs.output = Some(output.clone());
        inputs.email = Some("a@x.com".to_string());
        inputs.sequential = true;
        execute(inputs).unwrap();

        let result = reporting::writer::read_result(&output).unwrap();
        assert!(result.valid);
        assert_eq!(result.dlp_id, 12345);
    }

    #[test]
    fn test_run_without_posts_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        Config::default_config().save(&config_path).unwrap();

        let mut inputs = inputs();
        inputs.config_path = Some(config_path);
        inputs.input = Some(dir.path().to_path_buf());
        inputs.output = Some(dir.path().join("out"));
        let err = execute(inputs).unwrap_err();
        let proof_error = err
            .downcast_ref::<socialproof_core::error::ProofError>()
            .unwrap();
        assert!(proof_error.is_input());
    }
}
