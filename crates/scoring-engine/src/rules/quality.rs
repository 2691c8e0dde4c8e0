//! Quality: engagement, content richness and media presence.

use std::collections::BTreeSet;

use socialproof_core::config::QualityConfig;
use socialproof_core::types::Post;

use super::{clamp_unit, mean, percentage, ComponentReport};
use crate::outcome::AttributeValue;

#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    pub score: f64,
    pub engagement_score: f64,
    pub content_score: f64,
    pub media_score: f64,
}

pub fn assess_quality(posts: &[Post], config: &QualityConfig) -> QualityReport {
    if posts.is_empty() {
        tracing::info!("quality assessment skipped: no posts");
        return QualityReport {
            score: 0.0,
            engagement_score: 0.0,
            content_score: 0.0,
            media_score: 0.0,
        };
    }

    let engagement: Vec<f64> = posts.iter().map(|post| engagement_of(post, config)).collect();
    let content: Vec<f64> = posts.iter().map(|post| content_of(post, config)).collect();
    let engagement_score = mean(&engagement).unwrap_or(0.0) * 100.0;
    let content_score = mean(&content).unwrap_or(0.0) * 100.0;
    let media_score = media_score_of(posts, config);

    let score = clamp_unit(
        config.engagement_weight * engagement_score / 100.0
            + config.content_weight * content_score / 100.0
            + config.media_weight * media_score / 100.0,
    );

    tracing::info!(score, "quality assessment");
    QualityReport {
        score,
        engagement_score,
        content_score,
        media_score,
    }
}

/// Comments and shares count for more than likes; views floor at 1.
fn engagement_of(post: &Post, config: &QualityConfig) -> f64 {
    let e = &post.engagement;
    let weighted = e.likes as f64
        + 2.0 * e.comments as f64
        + 3.0 * (e.shares as f64 + e.retweets as f64);
    let rate = weighted / e.views.max(1) as f64;
    (rate * config.engagement_rate_scale).clamp(0.0, 1.0)
}

/// Rises linearly to the target length, flat after.
fn content_of(post: &Post, config: &QualityConfig) -> f64 {
    let length = post.content.trim().chars().count();
    (length as f64 / config.target_content_length as f64).min(1.0)
}

fn media_score_of(posts: &[Post], config: &QualityConfig) -> f64 {
    let with_media = posts.iter().filter(|post| post.has_media()).count();
    let kinds: BTreeSet<String> = posts
        .iter()
        .flat_map(|post| post.media.iter())
        .map(|media| media.kind.trim().to_lowercase())
        .filter(|kind| !kind.is_empty())
        .collect();
    let extra_kinds = kinds.len().saturating_sub(1) as f64;
    let bonus = (extra_kinds * config.media_diversity_bonus).min(config.media_diversity_cap);
    (percentage(with_media, posts.len(), 0.0) + bonus).min(100.0)
}

impl ComponentReport for QualityReport {
    fn score(&self) -> f64 {
        self.score
    }

    fn attributes(&self) -> Vec<(&'static str, AttributeValue)> {
        vec![
            ("engagement_score", AttributeValue::Percentage(self.engagement_score)),
            ("content_score", AttributeValue::Percentage(self.content_score)),
            ("media_score", AttributeValue::Percentage(self.media_score)),
        ]
    }
}
