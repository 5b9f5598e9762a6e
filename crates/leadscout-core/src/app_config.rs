use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// What the qualifier does with an item whose scorer call failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScorerFailurePolicy {
    /// Accept the item as a lead at exactly the minimum score.
    #[default]
    AcceptAtThreshold,
    /// Record the failure and do not promote the item.
    Reject,
}

impl std::fmt::Display for ScorerFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScorerFailurePolicy::AcceptAtThreshold => write!(f, "accept"),
            ScorerFailurePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Secrets needed to talk to the content API and the scoring service.
#[derive(Clone)]
pub struct Credentials {
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_username: String,
    pub reddit_password: String,
    pub openai_api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("reddit_client_id", &self.reddit_client_id)
            .field("reddit_client_secret", &"[redacted]")
            .field("reddit_username", &self.reddit_username)
            .field("reddit_password", &"[redacted]")
            .field("openai_api_key", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub profile_path: PathBuf,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_username: Option<String>,
    pub reddit_password: Option<String>,
    pub openai_api_key: Option<String>,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub reddit_auth_url: String,
    pub reddit_api_url: String,
    pub query_max: usize,
    pub page_size: usize,
    pub inter_request_delay_ms: u64,
    /// Retries per listing page on rate limits and server errors.
    pub reddit_max_retries: u32,
    /// First backoff delay; doubles on each further retry.
    pub reddit_backoff_base_ms: u64,
    pub openai_base_url: String,
    pub openai_model: String,
    pub scorer_failure_policy: ScorerFailurePolicy,
}

impl AppConfig {
    /// Collect the run credentials, reporting every one that is missing.
    ///
    /// Blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] naming each absent variable.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let fields = [
            ("REDDIT_CLIENT_ID", &self.reddit_client_id),
            ("REDDIT_CLIENT_SECRET", &self.reddit_client_secret),
            ("REDDIT_USERNAME", &self.reddit_username),
            ("REDDIT_PASSWORD", &self.reddit_password),
            ("OPENAI_API_KEY", &self.openai_api_key),
        ];

        let missing: Vec<String> = fields
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(var, _)| (*var).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }

        let take = |value: &Option<String>| value.clone().unwrap_or_default();
        Ok(Credentials {
            reddit_client_id: take(&self.reddit_client_id),
            reddit_client_secret: take(&self.reddit_client_secret),
            reddit_username: take(&self.reddit_username),
            reddit_password: take(&self.reddit_password),
            openai_api_key: take(&self.openai_api_key),
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("profile_path", &self.profile_path)
            .field("reddit_client_id", &self.reddit_client_id)
            .field("reddit_client_secret", &redact(&self.reddit_client_secret))
            .field("reddit_username", &self.reddit_username)
            .field("reddit_password", &redact(&self.reddit_password))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("reddit_auth_url", &self.reddit_auth_url)
            .field("reddit_api_url", &self.reddit_api_url)
            .field("query_max", &self.query_max)
            .field("page_size", &self.page_size)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("reddit_max_retries", &self.reddit_max_retries)
            .field("reddit_backoff_base_ms", &self.reddit_backoff_base_ms)
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("scorer_failure_policy", &self.scorer_failure_policy)
            .finish()
    }
}
