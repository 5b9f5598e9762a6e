//! Shared domain types and configuration for leadscout.

pub mod app_config;
pub mod config;
pub mod profile;
pub mod progress;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Credentials, Environment, ScorerFailurePolicy};
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{load_search_profile, load_search_profile_or_default, SearchProfile};
pub use progress::{ProgressEvent, ProgressSink};
pub use types::{ExploredRecord, Item, Lead, Ranking, RunResult, RunStats, AUTHOR_PLACEHOLDER};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("missing credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    #[error("failed to read search profile {path}: {source}")]
    ProfileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse search profile: {0}")]
    ProfileParse(#[from] serde_yaml::Error),

    #[error("search profile validation failed: {0}")]
    Validation(String),
}
