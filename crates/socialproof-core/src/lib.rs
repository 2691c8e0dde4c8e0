pub mod config;
pub mod error;
pub mod ids;
mod lenient;
pub mod loader;
pub mod platform;
pub mod time;
pub mod types;
pub mod warning;

pub use config::{Config, ConfigPaths};
pub use error::ProofError;
pub use ids::EvaluationId;
pub use loader::load_submission;
pub use platform::{Platform, PlatformProfile};
pub use types::{Account, Engagement, Media, Metadata, Post, ReferenceCorpus, Submission};
pub use warning::{ValidationWarning, ValidatorKind};
