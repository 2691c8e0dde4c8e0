use socialproof_core::warning::ValidationWarning;

pub fn timeline(warnings: &[ValidationWarning]) -> Vec<String> {
    warnings
        .iter()
        .enumerate()
        .map(|(index, warning)| format!("{:>3}. {warning}", index + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialproof_core::warning::ValidatorKind;

    #[test]
    fn test_numbers_warnings_in_order() {
        let lines = timeline(&[
            ValidationWarning::new(ValidatorKind::Authenticity, "p1", "unparseable timestamp"),
            ValidationWarning::new(ValidatorKind::Authenticity, "", "no posts"),
        ]);
        assert_eq!(lines[0], "  1. [authenticity] post p1: unparseable timestamp");
        assert_eq!(lines[1], "  2. [authenticity] no posts");
    }
}
