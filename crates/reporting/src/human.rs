use scoring_engine::{AttributeValue, ProofResult};

/// One line per headline figure, in the order operators read them.
pub fn summary_lines(result: &ProofResult) -> Vec<String> {
    let mut lines = vec![
        format!("Valid: {}", result.valid),
        format!("Score: {:.4}", result.score),
        format!("Ownership: {:.4}", result.ownership),
        format!("Quality: {:.4}", result.quality),
        format!("Authenticity: {:.4}", result.authenticity),
    ];
    match result.attribute("uniqueness_evaluated") {
        Some(AttributeValue::Flag(false)) => {
            lines.push("Uniqueness: not evaluated (no reference corpus)".to_string())
        }
        _ => lines.push(format!("Uniqueness: {:.4}", result.uniqueness)),
    }
    lines
}

pub fn human_summary(result: &ProofResult) -> String {
    summary_lines(result).join("\n")
}
