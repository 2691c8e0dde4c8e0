use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ProofError;
use crate::platform::{Platform, PlatformProfile};

const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub proof: ProofConfig,
    pub engine: EngineConfig,
    pub weights: AggregateWeights,
    pub ownership: OwnershipConfig,
    pub quality: QualityConfig,
    pub authenticity: AuthenticityConfig,
    pub uniqueness: UniquenessConfig,
    /// Keyed by the `platform` string posts carry; lookups ignore case.
    pub platforms: BTreeMap<String, PlatformProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProofConfig {
    /// Used when the submission carries no metadata file.
    pub dlp_id: u64,
    pub acceptance_threshold: f64,
    pub claimed_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub parallel: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AggregateWeights {
    pub ownership: f64,
    pub quality: f64,
    pub authenticity: f64,
    pub uniqueness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OwnershipConfig {
    pub email_weight: f64,
    pub user_id_weight: f64,
    pub url_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QualityConfig {
    pub engagement_weight: f64,
    pub content_weight: f64,
    pub media_weight: f64,
    /// Multiplier applied to the weighted interaction rate before clipping.
    pub engagement_rate_scale: f64,
    pub target_content_length: usize,
    /// Percentage points per distinct media type beyond the first.
    pub media_diversity_bonus: f64,
    pub media_diversity_cap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthenticityConfig {
    pub clock_skew_secs: i64,
    pub burst_window_secs: i64,
    pub burst_threshold: usize,
    pub future_date_penalty: f64,
    pub burst_penalty: f64,
    pub invalid_timestamp_penalty: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UniquenessConfig {
    pub content_weight: f64,
    pub media_weight: f64,
    pub max_reference_posts: usize,
    /// Pairwise comparison stops for a post once this similarity is reached.
    pub near_duplicate_similarity: f64,
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            dlp_id: 12345,
            acceptance_threshold: 0.6,
            claimed_email: None,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl Default for AggregateWeights {
    fn default() -> Self {
        Self {
            ownership: 0.30,
            quality: 0.25,
            authenticity: 0.25,
            uniqueness: 0.20,
        }
    }
}

impl Default for OwnershipConfig {
    fn default() -> Self {
        Self {
            email_weight: 0.34,
            user_id_weight: 0.33,
            url_weight: 0.33,
        }
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            engagement_weight: 0.3,
            content_weight: 0.3,
            media_weight: 0.4,
            engagement_rate_scale: 20.0,
            target_content_length: 280,
            media_diversity_bonus: 10.0,
            media_diversity_cap: 20.0,
        }
    }
}

impl Default for AuthenticityConfig {
    fn default() -> Self {
        Self {
            clock_skew_secs: 300,
            burst_window_secs: 3600,
            burst_threshold: 10,
            future_date_penalty: 0.2,
            burst_penalty: 0.05,
            invalid_timestamp_penalty: 0.1,
        }
    }
}

impl Default for UniquenessConfig {
    fn default() -> Self {
        Self {
            content_weight: 0.5,
            media_weight: 0.5,
            max_reference_posts: 10_000,
            near_duplicate_similarity: 0.95,
        }
    }
}

impl Config {
    pub fn default_config() -> Self {
        let platforms = Platform::ALL
            .iter()
            .map(|platform| (platform.to_string(), platform.default_profile()))
            .collect();
        Self {
            proof: ProofConfig::default(),
            engine: EngineConfig::default(),
            weights: AggregateWeights::default(),
            ownership: OwnershipConfig::default(),
            quality: QualityConfig::default(),
            authenticity: AuthenticityConfig::default(),
            uniqueness: UniquenessConfig::default(),
            platforms,
        }
    }

    pub fn platform(&self, name: &str) -> Option<&PlatformProfile> {
        self.platforms
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
            .map(|(_, profile)| profile)
    }

    /// Rejects weight sets and thresholds the validators cannot score with.
    pub fn validate(&self) -> Result<(), ProofError> {
        check_unit("proof.acceptance_threshold", self.proof.acceptance_threshold)?;
        check_weights(
            "ownership",
            &[
                self.ownership.email_weight,
                self.ownership.user_id_weight,
                self.ownership.url_weight,
            ],
        )?;
        check_weights(
            "quality",
            &[
                self.quality.engagement_weight,
                self.quality.content_weight,
                self.quality.media_weight,
            ],
        )?;
        check_weights(
            "uniqueness",
            &[self.uniqueness.content_weight, self.uniqueness.media_weight],
        )?;
        check_weights(
            "weights",
            &[
                self.weights.ownership,
                self.weights.quality,
                self.weights.authenticity,
                self.weights.uniqueness,
            ],
        )?;
        if self.weights.ownership + self.weights.quality + self.weights.authenticity <= 0.0 {
            return Err(ProofError::config(
                "weights without uniqueness must leave a positive total",
            ));
        }
        if self.quality.target_content_length == 0 {
            return Err(ProofError::config("quality.target_content_length must be > 0"));
        }
        if self.quality.engagement_rate_scale <= 0.0 {
            return Err(ProofError::config("quality.engagement_rate_scale must be > 0"));
        }
        if self.quality.media_diversity_bonus < 0.0 || self.quality.media_diversity_cap < 0.0 {
            return Err(ProofError::config("quality media diversity values must be >= 0"));
        }
        if self.authenticity.burst_window_secs <= 0 {
            return Err(ProofError::config("authenticity.burst_window_secs must be > 0"));
        }
        if self.authenticity.clock_skew_secs < 0 {
            return Err(ProofError::config("authenticity.clock_skew_secs must be >= 0"));
        }
        for (name, penalty) in [
            ("future_date_penalty", self.authenticity.future_date_penalty),
            ("burst_penalty", self.authenticity.burst_penalty),
            ("invalid_timestamp_penalty", self.authenticity.invalid_timestamp_penalty),
        ] {
            check_unit(&format!("authenticity.{name}"), penalty)?;
        }
        let cutoff = self.uniqueness.near_duplicate_similarity;
        if cutoff <= 0.0 || cutoff > 1.0 {
            return Err(ProofError::config(format!(
                "uniqueness.near_duplicate_similarity must be in (0, 1], got {cutoff}"
            )));
        }
        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("parse config TOML")?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let output = toml::to_string_pretty(self).context("render config TOML")?;
        Ok(output)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read config at {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        let contents = self.to_toml_string()?;
        fs::write(path, contents).with_context(|| format!("write config at {}", path.display()))?;
        Ok(())
    }
}

impl AggregateWeights {
    pub fn without_uniqueness(&self) -> [f64; 3] {
        let total = self.ownership + self.quality + self.authenticity;
        [
            self.ownership / total,
            self.quality / total,
            self.authenticity / total,
        ]
    }

    pub fn with_uniqueness(&self) -> [f64; 4] {
        let total = self.ownership + self.quality + self.authenticity + self.uniqueness;
        [
            self.ownership / total,
            self.quality / total,
            self.authenticity / total,
            self.uniqueness / total,
        ]
    }
}

impl ConfigPaths {
    pub fn resolve() -> Result<Self> {
        let project_dirs = ProjectDirs::from("io", "socialproof", "socialproof")
            .ok_or_else(|| anyhow::anyhow!("unable to determine project directories"))?;
        Ok(Self {
            config_path: project_dirs.config_dir().join("config.toml"),
        })
    }
}

fn check_unit(name: &str, value: f64) -> Result<(), ProofError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ProofError::config(format!("{name} must be in [0, 1], got {value}")));
    }
    Ok(())
}

fn check_weights(section: &str, weights: &[f64]) -> Result<(), ProofError> {
    if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
        return Err(ProofError::config(format!("{section} weights must be finite and >= 0")));
    }
    let total: f64 = weights.iter().sum();
    if (total - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(ProofError::config(format!(
            "{section} weights must sum to 1.0, got {total}"
        )));
    }
    Ok(())
}
