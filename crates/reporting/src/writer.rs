use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use scoring_engine::ProofResult;

use crate::json::{parse_json, render_json};
use crate::redact::redact_path;

pub const RESULTS_FILE: &str = "results.json";

/// Writes `results.json` under `dir`, creating the directory if needed.
pub fn write_result(dir: &Path, result: &ProofResult) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create output dir {}", dir.display()))?;
    let path = dir.join(RESULTS_FILE);
    let contents = render_json(result)?;
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %redact_path(&path), "result written");
    Ok(path)
}

/// Accepts either a results file or the directory holding one.
pub fn read_result(path: &Path) -> Result<ProofResult> {
    let path = if path.is_dir() {
        path.join(RESULTS_FILE)
    } else {
        path.to_path_buf()
    };
    let contents =
        fs::read_to_string(&path).with_context(|| format!("read result {}", path.display()))?;
    parse_json(&contents)
}
