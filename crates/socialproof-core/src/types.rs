use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ProofError;
use crate::lenient;

/// Identity the submission claims to belong to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    #[serde(deserialize_with = "lenient::string")]
    pub user_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub profile_info: Map<String, Value>,
}

/// Exporters disagree on types, so every field tolerates `null` and odd
/// JSON types instead of failing the submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Post {
    #[serde(deserialize_with = "lenient::string")]
    pub post_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub user_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub platform: String,
    #[serde(deserialize_with = "lenient::string")]
    pub post_url: String,
    #[serde(deserialize_with = "lenient::string")]
    pub content: String,
    /// Raw ISO-8601 value; parsed lazily so a single bad date stays a warning.
    #[serde(deserialize_with = "lenient::string")]
    pub posted_at: String,
    #[serde(deserialize_with = "lenient::sequence")]
    pub media: Vec<Media>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub engagement: Engagement,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Media {
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub alt_text: Option<String>,
    /// Content hash supplied by the exporter, when available.
    #[serde(deserialize_with = "lenient::optional_string")]
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Engagement {
    #[serde(deserialize_with = "lenient::count")]
    pub likes: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub comments: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub shares: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub views: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub retweets: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub dlp_id: u64,
    #[serde(flatten)]
    pub provenance: Map<String, Value>,
}

/// Posts from other identities, only ever read for novelty comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ReferenceCorpus {
    pub posts: Vec<Post>,
}

/// Everything one evaluation reads. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Submission {
    account: Account,
    posts: Vec<Post>,
    metadata: Metadata,
    reference: Option<ReferenceCorpus>,
}

impl Post {
    pub fn new(post_id: &str, user_id: &str, platform: &str, post_url: &str) -> Self {
        Self {
            post_id: post_id.to_string(),
            user_id: user_id.to_string(),
            platform: platform.to_string(),
            post_url: post_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn with_posted_at(mut self, posted_at: &str) -> Self {
        self.posted_at = posted_at.to_string();
        self
    }

    pub fn with_media(mut self, media: Media) -> Self {
        self.media.push(media);
        self
    }

    pub fn with_engagement(mut self, engagement: Engagement) -> Self {
        self.engagement = engagement;
        self
    }

    pub fn has_media(&self) -> bool {
        !self.media.is_empty()
    }
}

impl Media {
    pub fn new(kind: &str, url: &str) -> Self {
        Self {
            kind: kind.to_string(),
            url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_fingerprint(mut self, fingerprint: &str) -> Self {
        self.fingerprint = Some(fingerprint.to_string());
        self
    }
}

impl Metadata {
    pub fn new(dlp_id: u64) -> Self {
        Self {
            dlp_id,
            provenance: Map::new(),
        }
    }
}

impl ReferenceCorpus {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl Submission {
    /// Checks required identity fields; nothing is scored if this fails.
    pub fn new(
        account: Account,
        posts: Vec<Post>,
        metadata: Metadata,
        reference: Option<ReferenceCorpus>,
    ) -> Result<Self, ProofError> {
        if account.user_id.trim().is_empty() {
            return Err(ProofError::input("account is missing user_id"));
        }
        Ok(Self {
            account,
            posts,
            metadata,
            reference,
        })
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn reference(&self) -> Option<&ReferenceCorpus> {
        self.reference.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(user_id: &str) -> Account {
        Account {
            user_id: user_id.to_string(),
            username: "alice".to_string(),
            email: Some("a@x.com".to_string()),
            profile_info: Map::new(),
        }
    }

    #[test]
    fn test_blank_user_id_is_input_error() {
        let err = Submission::new(account("  "), Vec::new(), Metadata::new(1), None).unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_account_requires_user_id_field() {
        let parsed: Result<Account, _> = serde_json::from_str(r#"{"username": "alice"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_post_defaults_missing_fields() {
        let post: Post = serde_json::from_str(
            r#"{"post_id": "p1", "engagement": {"likes": 4}, "media": [{"type": "image", "url": "https://pbs.twimg.com/a.jpg"}]}"#,
        )
        .unwrap();
        assert_eq!(post.engagement.likes, 4);
        assert_eq!(post.engagement.views, 0);
        assert_eq!(post.media[0].kind, "image");
        assert!(post.content.is_empty());
    }

    #[test]
    fn test_post_tolerates_nulls_and_odd_types() {
        let post: Post = serde_json::from_str(
            r#"{"post_id": 17, "content": null, "posted_at": 1696150000,
                "media": null, "engagement": {"likes": null, "views": "250"}}"#,
        )
        .unwrap();
        assert_eq!(post.post_id, "17");
        assert!(post.content.is_empty());
        assert_eq!(post.posted_at, "1696150000");
        assert!(post.media.is_empty());
        assert_eq!(post.engagement.likes, 0);
        assert_eq!(post.engagement.views, 250);
    }

    #[test]
    fn test_null_account_user_id_is_blank() {
        let account: Account = serde_json::from_str(r#"{"user_id": null, "email": null}"#).unwrap();
        let err = Submission::new(account, Vec::new(), Metadata::new(1), None).unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_metadata_keeps_provenance() {
        let metadata: Metadata =
            serde_json::from_str(r#"{"dlp_id": 7, "source": "export", "version": 2}"#).unwrap();
        assert_eq!(metadata.dlp_id, 7);
        assert_eq!(metadata.provenance.get("source"), Some(&Value::from("export")));
    }
}
