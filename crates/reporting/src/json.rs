use anyhow::{Context, Result};

use scoring_engine::ProofResult;

pub fn render_json(result: &ProofResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("render result JSON")
}

pub fn parse_json(contents: &str) -> Result<ProofResult> {
    serde_json::from_str(contents).context("parse result JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_result_reads_back() {
        let result = crate::tests::sample_result();
        let rendered = render_json(&result).unwrap();
        assert!(rendered.contains("\"timestamp\": \"2026-10-19T12:00:00.000000Z\""));
        assert_eq!(parse_json(&rendered).unwrap(), result);
    }

    #[test]
    fn test_rejects_foreign_json() {
        assert!(parse_json(r#"{"session_id": "x"}"#).is_err());
    }
}
