//! Uniqueness: novelty of content and media against a reference corpus.
//!
//! Content is compared as sets of lowercase alphanumeric tokens (Jaccard
//! overlap). Exact duplicates are caught by fingerprint before the pairwise
//! pass, and the pairwise pass for a post stops once a near duplicate is
//! found. Media is matched on normalized URL or supplied fingerprint.

use std::collections::HashSet;

use rayon::prelude::*;
use sha2::{Digest, Sha256};
use socialproof_core::config::UniquenessConfig;
use socialproof_core::types::{Media, Post, ReferenceCorpus};
use url::Url;

use super::{clamp_unit, mean, percentage, ComponentReport};
use crate::outcome::AttributeValue;

#[derive(Debug, Clone, PartialEq)]
pub struct UniquenessReport {
    pub score: f64,
    /// The three sub-metrics below are percentages in [0, 100];
    /// `uniqueness_score` is `score` on that scale.
    pub content_uniqueness: f64,
    pub media_uniqueness: f64,
    pub uniqueness_score: f64,
    pub reference_posts_compared: usize,
}

/// Read-only lookup structures over the (capped) reference corpus.
struct ReferenceIndex {
    content_fingerprints: HashSet<String>,
    token_sets: Vec<HashSet<String>>,
    media_urls: HashSet<String>,
    media_fingerprints: HashSet<String>,
}

pub fn assess_uniqueness(
    posts: &[Post],
    reference: &ReferenceCorpus,
    config: &UniquenessConfig,
    parallel: bool,
) -> UniquenessReport {
    let limit = config.max_reference_posts.min(reference.len());
    if limit < reference.len() {
        tracing::debug!(
            corpus = reference.len(),
            limit,
            "reference corpus truncated for comparison"
        );
    }
    let index = ReferenceIndex::build(&reference.posts[..limit]);

    let novelty = |post: &Post| index.content_novelty(post, config.near_duplicate_similarity);
    // Collected in post order either way, so the mean is identical.
    let novelties: Vec<f64> = if parallel {
        posts.par_iter().filter_map(novelty).collect()
    } else {
        posts.iter().filter_map(novelty).collect()
    };
    let content_uniqueness = mean(&novelties).map_or(100.0, |value| value * 100.0);

    let media: Vec<&Media> = posts.iter().flat_map(|post| post.media.iter()).collect();
    let novel_media = media.iter().filter(|item| !index.has_media(item)).count();
    let media_uniqueness = percentage(novel_media, media.len(), 100.0);

    let score = clamp_unit(
        config.content_weight * content_uniqueness / 100.0
            + config.media_weight * media_uniqueness / 100.0,
    );

    tracing::info!(score, compared = limit, "uniqueness assessment");
    UniquenessReport {
        score,
        content_uniqueness,
        media_uniqueness,
        uniqueness_score: score * 100.0,
        reference_posts_compared: limit,
    }
}

impl ReferenceIndex {
    fn build(posts: &[Post]) -> Self {
        let mut index = Self {
            content_fingerprints: HashSet::new(),
            token_sets: Vec::with_capacity(posts.len()),
            media_urls: HashSet::new(),
            media_fingerprints: HashSet::new(),
        };
        for post in posts {
            let tokens = tokenize(&post.content);
            if !tokens.is_empty() {
                index.content_fingerprints.insert(fingerprint(&tokens));
                index.token_sets.push(tokens.into_iter().collect());
            }
            for media in &post.media {
                if let Some(url) = normalize_media_url(&media.url) {
                    index.media_urls.insert(url);
                }
                if let Some(print) = media_fingerprint(media) {
                    index.media_fingerprints.insert(print);
                }
            }
        }
        index
    }

    /// `1 - max similarity`, or `None` for posts without any text.
    fn content_novelty(&self, post: &Post, cutoff: f64) -> Option<f64> {
        let tokens = tokenize(&post.content);
        if tokens.is_empty() {
            return None;
        }
        if self.content_fingerprints.contains(&fingerprint(&tokens)) {
            return Some(0.0);
        }
        let tokens: HashSet<String> = tokens.into_iter().collect();
        let mut max_similarity: f64 = 0.0;
        for candidate in &self.token_sets {
            max_similarity = max_similarity.max(jaccard(&tokens, candidate));
            if max_similarity >= cutoff {
                break;
            }
        }
        Some(1.0 - max_similarity)
    }

    fn has_media(&self, media: &Media) -> bool {
        let url_match = normalize_media_url(&media.url)
            .map(|url| self.media_urls.contains(&url))
            .unwrap_or(false);
        let print_match = media_fingerprint(media)
            .map(|print| self.media_fingerprints.contains(&print))
            .unwrap_or(false);
        url_match || print_match
    }
}

fn tokenize(content: &str) -> Vec<String> {
    content
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn fingerprint(tokens: &[String]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(tokens.join(" ").as_bytes());
    hex::encode(hasher.finalize())
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Lowercases scheme and host and drops query and fragment, so resized
/// variants of the same asset compare equal.
fn normalize_media_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Url::parse(raw) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            Some(url.to_string())
        }
        Err(_) => Some(raw.to_lowercase()),
    }
}

fn media_fingerprint(media: &Media) -> Option<String> {
    media
        .fingerprint
        .as_deref()
        .map(str::trim)
        .filter(|print| !print.is_empty())
        .map(str::to_lowercase)
}

impl ComponentReport for UniquenessReport {
    fn score(&self) -> f64 {
        self.score
    }

    fn attributes(&self) -> Vec<(&'static str, AttributeValue)> {
        vec![
            (
                "content_uniqueness",
                AttributeValue::Percentage(self.content_uniqueness),
            ),
            (
                "media_uniqueness",
                AttributeValue::Percentage(self.media_uniqueness),
            ),
            (
                "uniqueness_score",
                AttributeValue::Percentage(self.uniqueness_score),
            ),
            (
                "reference_posts_compared",
                AttributeValue::Count(self.reference_posts_compared as u64),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: &str) -> Post {
        Post::new("p", "u1", "X", "https://x.com/alice/status/1").with_content(content)
    }

    fn corpus(posts: Vec<Post>) -> ReferenceCorpus {
        ReferenceCorpus::new(posts)
    }

    #[test]
    fn test_exact_duplicate_scores_zero() {
        let original = post("The quick brown fox")
            .with_media(Media::new("image", "https://pbs.twimg.com/media/fox.jpg"));
        let reference = corpus(vec![original.clone(), post("something else entirely")]);
        let report = assess_uniqueness(&[original], &reference, &UniquenessConfig::default(), false);
        assert_eq!(report.content_uniqueness, 0.0);
        assert_eq!(report.media_uniqueness, 0.0);
        assert_eq!(report.score, 0.0);
    }

    #[test]
    fn test_disjoint_submission_scores_full() {
        let submitted = post("sunrise over the harbour")
            .with_media(Media::new("image", "https://pbs.twimg.com/media/harbour.jpg"));
        let reference = corpus(vec![post("quarterly earnings call")
            .with_media(Media::new("image", "https://pbs.twimg.com/media/chart.jpg"))]);
        let report = assess_uniqueness(&[submitted], &reference, &UniquenessConfig::default(), false);
        assert_eq!(report.content_uniqueness, 100.0);
        assert_eq!(report.media_uniqueness, 100.0);
        assert_eq!(report.score, 1.0);
        assert_eq!(report.uniqueness_score, 100.0);
    }

    #[test]
    fn test_uniqueness_score_attribute_matches_field_scale() {
        let reference = corpus(vec![post("the quick brown fox")]);
        let submitted = [post("the quick brown fox"), post("an entirely new thought")];
        let report = assess_uniqueness(&submitted, &reference, &UniquenessConfig::default(), false);
        assert!((report.uniqueness_score - report.score * 100.0).abs() < 1e-9);
        let attributes = report.attributes();
        let (_, value) = attributes
            .iter()
            .find(|(name, _)| *name == "uniqueness_score")
            .unwrap();
        assert_eq!(*value, AttributeValue::Percentage(report.uniqueness_score));
    }

    #[test]
    fn test_normalization_ignores_case_and_punctuation() {
        let reference = corpus(vec![post("Hello, World!")]);
        let report = assess_uniqueness(&[post("hello world")], &reference, &UniquenessConfig::default(), false);
        assert_eq!(report.content_uniqueness, 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let reference = corpus(vec![post("alpha beta gamma delta")]);
        let report = assess_uniqueness(&[post("alpha beta")], &reference, &UniquenessConfig::default(), false);
        assert!((report.content_uniqueness - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_media_query_string_ignored() {
        let reference = corpus(vec![post("x").with_media(Media::new(
            "image",
            "https://PBS.twimg.com/media/a.jpg?name=large",
        ))]);
        let submitted = post("y").with_media(Media::new("image", "https://pbs.twimg.com/media/a.jpg"));
        let report = assess_uniqueness(&[submitted], &reference, &UniquenessConfig::default(), false);
        assert_eq!(report.media_uniqueness, 0.0);
    }

    #[test]
    fn test_media_fingerprint_match() {
        let reference = corpus(vec![post("x").with_media(
            Media::new("image", "https://cdn.one/a.jpg").with_fingerprint("ABC123"),
        )]);
        let submitted = post("y").with_media(
            Media::new("image", "https://cdn.two/b.jpg").with_fingerprint("abc123"),
        );
        let report = assess_uniqueness(&[submitted], &reference, &UniquenessConfig::default(), false);
        assert_eq!(report.media_uniqueness, 0.0);
    }

    #[test]
    fn test_textless_posts_excluded_from_content() {
        let reference = corpus(vec![post("")]);
        let report = assess_uniqueness(&[post(""), post("   ")], &reference, &UniquenessConfig::default(), false);
        assert_eq!(report.content_uniqueness, 100.0);
        assert_eq!(report.media_uniqueness, 100.0);
    }

    #[test]
    fn test_reference_cap_limits_comparisons() {
        let config = UniquenessConfig {
            max_reference_posts: 1,
            ..UniquenessConfig::default()
        };
        let reference = corpus(vec![post("unrelated words"), post("copied text here")]);
        let report = assess_uniqueness(&[post("copied text here")], &reference, &config, false);
        assert_eq!(report.reference_posts_compared, 1);
        assert_eq!(report.content_uniqueness, 100.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let reference = corpus(
            (0..50)
                .map(|i| post(&format!("reference post number {i} about topic {}", i % 7)))
                .collect(),
        );
        let submitted: Vec<Post> = (0..40)
            .map(|i| post(&format!("post number {i} about topic {}", i % 5)))
            .collect();
        let config = UniquenessConfig::default();
        let sequential = assess_uniqueness(&submitted, &reference, &config, false);
        let parallel = assess_uniqueness(&submitted, &reference, &config, true);
        assert_eq!(sequential, parallel);
    }
}
