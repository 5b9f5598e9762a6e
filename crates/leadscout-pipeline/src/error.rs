use thiserror::Error;

use leadscout_core::ConfigError;
use leadscout_reddit::RedditError;

/// Errors returned by the scoring service client.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from scoring service: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("scoring service returned no content")]
    EmptyResponse,

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid scoring service URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Errors that stop a run before it starts.
///
/// Failures during a run are recovered and reported as progress warnings.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid run input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("content source unavailable: {0}")]
    Reddit(#[from] RedditError),

    #[error("scoring service unavailable: {0}")]
    Scoring(#[from] ScoringError),
}
