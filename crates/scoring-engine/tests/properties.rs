//! Range and monotonicity properties over generated submissions.

use proptest::prelude::*;
use serde_json::Map;
use time::macros::datetime;
use time::OffsetDateTime;

use scoring_engine::{assess_quality, AttributeValue, ProofEngine};
use socialproof_core::config::{Config, QualityConfig};
use socialproof_core::types::{Account, Engagement, Media, Metadata, Post, ReferenceCorpus, Submission};

const NOW: OffsetDateTime = datetime!(2026-10-19 12:00 UTC);

const URLS: [&str; 6] = [
    "https://x.com/alice/status/1",
    "https://twitter.com/alice/status/2",
    "https://www.instagram.com/alice/p/3",
    "https://evil.example/alice",
    "not a url",
    "",
];

const DATES: [&str; 5] = [
    "2026-10-01T10:00:00Z",
    "2026-10-01T10:05:00Z",
    "2030-01-01T00:00:00Z",
    "2026-10-19 11:59:00",
    "garbage",
];

const KINDS: [&str; 4] = ["image", "video", "gif", ""];

fn media_strategy() -> impl Strategy<Value = Media> {
    (0..KINDS.len(), 0..URLS.len()).prop_map(|(kind, url)| Media::new(KINDS[kind], URLS[url]))
}

fn post_strategy() -> impl Strategy<Value = Post> {
    (
        prop_oneof![Just("u1"), Just("u2")],
        prop_oneof![Just("X"), Just("Instagram"), Just("Unknown")],
        0..URLS.len(),
        0..DATES.len(),
        ".{0,400}",
        prop::collection::vec(media_strategy(), 0..3),
        (0u64..5_000, 0u64..500, 0u64..500, 0u64..100_000),
    )
        .prop_map(|(user_id, platform, url, date, content, media, (likes, comments, shares, views))| {
            let mut post = Post::new("p", user_id, platform, URLS[url])
                .with_posted_at(DATES[date])
                .with_content(&content)
                .with_engagement(Engagement {
                    likes,
                    comments,
                    shares,
                    views,
                    retweets: 0,
                });
            post.media = media;
            post
        })
}

fn account() -> Account {
    Account {
        user_id: "u1".to_string(),
        username: "alice".to_string(),
        email: Some("a@x.com".to_string()),
        profile_info: Map::new(),
    }
}

proptest! {
    #[test]
    fn scores_and_percentages_stay_in_range(
        posts in prop::collection::vec(post_strategy(), 0..25),
        reference in prop::option::of(prop::collection::vec(post_strategy(), 0..10)),
    ) {
        let submission = Submission::new(
            account(),
            posts,
            Metadata::new(1),
            reference.map(ReferenceCorpus::new),
        ).unwrap();
        let engine = ProofEngine::new(Config::default_config()).unwrap();
        let result = engine.evaluate_at(&submission, NOW).result;

        for score in [result.score, result.ownership, result.quality, result.authenticity, result.uniqueness] {
            prop_assert!((0.0..=1.0).contains(&score), "score out of range: {}", score);
        }
        for (name, value) in &result.attributes {
            if let AttributeValue::Percentage(pct) = value {
                prop_assert!((0.0..=100.0).contains(pct), "{} out of range: {}", name, pct);
            }
        }
        prop_assert_eq!(result.valid, result.score >= 0.6);
    }

    #[test]
    fn adding_media_never_lowers_quality(
        posts in prop::collection::vec(post_strategy(), 1..15),
        index in any::<prop::sample::Index>(),
        media in media_strategy(),
    ) {
        let config = QualityConfig::default();
        let mut before = posts;
        for post in &mut before {
            post.media.clear();
        }
        let mut after = before.clone();
        let target = index.index(after.len());
        after[target].media.push(media);

        let before = assess_quality(&before, &config);
        let after = assess_quality(&after, &config);
        prop_assert!(after.media_score >= before.media_score);
        prop_assert!(after.score >= before.score);
    }

    #[test]
    fn sequential_matches_parallel(
        posts in prop::collection::vec(post_strategy(), 0..15),
        reference in prop::collection::vec(post_strategy(), 0..10),
    ) {
        let submission = Submission::new(
            account(),
            posts,
            Metadata::new(1),
            Some(ReferenceCorpus::new(reference)),
        ).unwrap();
        let mut config = Config::default_config();
        config.engine.parallel = false;
        let sequential = ProofEngine::new(config.clone()).unwrap().evaluate_at(&submission, NOW);
        config.engine.parallel = true;
        let parallel = ProofEngine::new(config).unwrap().evaluate_at(&submission, NOW);
        prop_assert!(sequential.result.same_verdict(&parallel.result));
    }
}
