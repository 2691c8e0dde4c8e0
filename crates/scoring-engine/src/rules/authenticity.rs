//! Authenticity: structurally or temporally implausible data.
//!
//! Every finding subtracts a fixed penalty from 1.0, so several small
//! issues degrade the score gradually instead of zeroing it.

use std::collections::HashMap;

use socialproof_core::config::Config;
use socialproof_core::platform::PlatformProfile;
use socialproof_core::time::parse_timestamp;
use socialproof_core::types::Post;
use socialproof_core::warning::{ValidationWarning, ValidatorKind};
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use url::Url;

use super::{clamp_unit, percentage, ComponentReport};
use crate::outcome::AttributeValue;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticityReport {
    pub score: f64,
    pub valid_urls_percentage: f64,
    pub time_consistency_issues: f64,
    pub future_dates: usize,
    pub unusual_posting_frequency: usize,
    pub invalid_timestamps: usize,
    pub warnings: Vec<ValidationWarning>,
}

pub fn verify_authenticity(posts: &[Post], config: &Config, now: OffsetDateTime) -> AuthenticityReport {
    let mut warnings = Vec::new();
    let settings = &config.authenticity;

    let mut valid_urls = 0;
    for post in posts {
        match check_post_urls(post, config) {
            Ok(()) => valid_urls += 1,
            Err(message) => warnings.push(ValidationWarning::new(
                ValidatorKind::Authenticity,
                &post.post_id,
                message,
            )),
        }
    }
    // Nothing verifiable is not the same as verified.
    let valid_urls_percentage = percentage(valid_urls, posts.len(), 0.0);

    // Saturates: an enormous skew means nothing counts as future-dated.
    let latest_allowed = now
        .checked_add(Duration::seconds(settings.clock_skew_secs))
        .unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc());
    let mut future_dates = 0;
    let mut invalid_timestamps = 0;
    let mut buckets: HashMap<i64, usize> = HashMap::new();
    for post in posts {
        let Some(posted_at) = parse_timestamp(&post.posted_at) else {
            invalid_timestamps += 1;
            warnings.push(ValidationWarning::new(
                ValidatorKind::Authenticity,
                &post.post_id,
                format!("unparseable posted_at '{}'", post.posted_at),
            ));
            continue;
        };
        if posted_at > latest_allowed {
            future_dates += 1;
        }
        let bucket = posted_at.unix_timestamp().div_euclid(settings.burst_window_secs);
        *buckets.entry(bucket).or_insert(0) += 1;
    }
    let unusual_posting_frequency = buckets
        .values()
        .filter(|count| **count > settings.burst_threshold)
        .count();

    let issues = future_dates + unusual_posting_frequency + invalid_timestamps;
    let time_consistency_issues = if posts.is_empty() {
        0.0
    } else {
        (issues as f64 / posts.len() as f64 * 100.0).min(100.0)
    };

    let penalty = future_dates as f64 * settings.future_date_penalty
        + unusual_posting_frequency as f64 * settings.burst_penalty
        + invalid_timestamps as f64 * settings.invalid_timestamp_penalty
        + (100.0 - valid_urls_percentage) / 100.0;
    let score = clamp_unit(1.0 - penalty);

    tracing::info!(
        score,
        future_dates,
        unusual_posting_frequency,
        invalid_timestamps,
        "authenticity verification"
    );
    AuthenticityReport {
        score,
        valid_urls_percentage,
        time_consistency_issues,
        future_dates,
        unusual_posting_frequency,
        invalid_timestamps,
        warnings,
    }
}

/// The post URL and every media URL must belong to the declared platform.
fn check_post_urls(post: &Post, config: &Config) -> Result<(), String> {
    let profile = config
        .platform(&post.platform)
        .ok_or_else(|| format!("unknown platform '{}'", post.platform))?;
    check_url(&post.post_url, profile)?;
    for media in &post.media {
        check_url(&media.url, profile)?;
    }
    Ok(())
}

fn check_url(raw: &str, profile: &PlatformProfile) -> Result<(), String> {
    let url = Url::parse(raw.trim()).map_err(|err| format!("malformed url '{raw}': {err}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("url '{raw}' uses scheme '{}'", url.scheme()));
    }
    let host = url
        .host_str()
        .ok_or_else(|| format!("url '{raw}' has no host"))?;
    if !profile.matches_host(host) {
        return Err(format!("url '{raw}' is not served by the declared platform"));
    }
    Ok(())
}

impl ComponentReport for AuthenticityReport {
    fn score(&self) -> f64 {
        self.score
    }

    fn attributes(&self) -> Vec<(&'static str, AttributeValue)> {
        vec![
            (
                "valid_urls_percentage",
                AttributeValue::Percentage(self.valid_urls_percentage),
            ),
            (
                "time_consistency_issues",
                AttributeValue::Percentage(self.time_consistency_issues),
            ),
            ("future_dates", AttributeValue::Count(self.future_dates as u64)),
            (
                "unusual_posting_frequency",
                AttributeValue::Count(self.unusual_posting_frequency as u64),
            ),
            (
                "invalid_timestamps",
                AttributeValue::Count(self.invalid_timestamps as u64),
            ),
        ]
    }
}
