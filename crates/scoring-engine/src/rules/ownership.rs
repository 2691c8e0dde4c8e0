//! Ownership: does the submitted data belong to the claimed identity?
//!
//! Signals:
//! - the claimed email matches the account email
//! - posts carry the account's `user_id`
//! - post URLs name the account's handle (heuristic, not proof)

use socialproof_core::config::Config;
use socialproof_core::types::{Account, Post};
use url::Url;

use super::{clamp_unit, percentage, ComponentReport};
use crate::outcome::AttributeValue;

#[derive(Debug, Clone, PartialEq)]
pub struct OwnershipReport {
    pub score: f64,
    pub email_verified: bool,
    pub user_id_match_percentage: f64,
    pub url_consistency_percentage: f64,
}

pub fn verify_ownership(account: &Account, posts: &[Post], config: &Config) -> OwnershipReport {
    let email_verified = email_matches(config.proof.claimed_email.as_deref(), account.email.as_deref());

    let user_id_matches = posts
        .iter()
        .filter(|post| post.user_id == account.user_id)
        .count();
    let username = normalize_handle(&account.username);
    let url_matches = posts
        .iter()
        .filter(|post| url_names_account(post, &username, config))
        .count();

    // No posts means no contradicting evidence.
    let user_id_match_percentage = percentage(user_id_matches, posts.len(), 100.0);
    let url_consistency_percentage = percentage(url_matches, posts.len(), 100.0);

    let weights = &config.ownership;
    let score = clamp_unit(
        weights.email_weight * if email_verified { 1.0 } else { 0.0 }
            + weights.user_id_weight * user_id_match_percentage / 100.0
            + weights.url_weight * url_consistency_percentage / 100.0,
    );

    tracing::info!(score, "ownership verification");
    OwnershipReport {
        score,
        email_verified,
        user_id_match_percentage,
        url_consistency_percentage,
    }
}

/// Without a claimed email there is nothing to contradict the account.
fn email_matches(claimed: Option<&str>, account: Option<&str>) -> bool {
    let Some(claimed) = claimed.map(str::trim).filter(|value| !value.is_empty()) else {
        return true;
    };
    match account {
        Some(email) => email.trim().to_lowercase() == claimed.to_lowercase(),
        None => false,
    }
}

fn normalize_handle(value: &str) -> String {
    value.trim().trim_start_matches('@').to_lowercase()
}

fn url_names_account(post: &Post, username: &str, config: &Config) -> bool {
    if username.is_empty() {
        return false;
    }
    if post.post_url.to_lowercase().contains(username) {
        return true;
    }
    let Some(profile) = config.platform(&post.platform) else {
        return false;
    };
    let Ok(url) = Url::parse(post.post_url.trim()) else {
        return false;
    };
    url.path_segments()
        .and_then(|mut segments| segments.nth(profile.handle_segment))
        .map(|segment| normalize_handle(segment) == username)
        .unwrap_or(false)
}

impl ComponentReport for OwnershipReport {
    fn score(&self) -> f64 {
        self.score
    }

    fn attributes(&self) -> Vec<(&'static str, AttributeValue)> {
        vec![
            ("email_verified", AttributeValue::Flag(self.email_verified)),
            (
                "user_id_match_percentage",
                AttributeValue::Percentage(self.user_id_match_percentage),
            ),
            (
                "url_consistency_percentage",
                AttributeValue::Percentage(self.url_consistency_percentage),
            ),
        ]
    }
}
