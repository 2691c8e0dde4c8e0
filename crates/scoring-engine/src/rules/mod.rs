//! The four validators. Each one reads the submission and returns a fresh
//! report; none depends on another's output.

pub mod authenticity;
pub mod ownership;
pub mod quality;
pub mod uniqueness;

use crate::outcome::AttributeValue;

/// What the aggregator needs from every validator report.
pub trait ComponentReport {
    /// Sub-score in [0, 1].
    fn score(&self) -> f64;
    fn attributes(&self) -> Vec<(&'static str, AttributeValue)>;
}

/// Clamp to [0, 1], mapping NaN to 0 and infinities to the nearest bound.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        tracing::warn!("NaN sub-score clamped to 0");
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// `hits / total` scaled to 100, or `empty` when there is nothing to count.
pub(crate) fn percentage(hits: usize, total: usize, empty: f64) -> f64 {
    if total == 0 {
        return empty;
    }
    (hits as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
