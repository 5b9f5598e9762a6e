use crate::app_config::{AppConfig, Environment, ScorerFailurePolicy};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Credentials are optional here; [`AppConfig::credentials`] enforces them
/// right before a run starts.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("LEADSCOUT_ENV", "development"))?;
    let log_level = or_default("LEADSCOUT_LOG_LEVEL", "info");
    let profile_path = PathBuf::from(or_default(
        "LEADSCOUT_PROFILE_PATH",
        "./config/search.yaml",
    ));

    let user_agent = or_default("LEADSCOUT_USER_AGENT", "leadscout/0.1 (lead-tracking)");
    let request_timeout_secs = parse_u64("LEADSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let reddit_auth_url = or_default("LEADSCOUT_REDDIT_AUTH_URL", "https://www.reddit.com/");
    let reddit_api_url = or_default("LEADSCOUT_REDDIT_API_URL", "https://oauth.reddit.com/");
    let query_max = parse_usize("LEADSCOUT_QUERY_MAX", "1000")?;
    let page_size = parse_usize("LEADSCOUT_PAGE_SIZE", "100")?;
    let inter_request_delay_ms = parse_u64("LEADSCOUT_INTER_REQUEST_DELAY_MS", "0")?;
    let reddit_max_retries = parse_u32("LEADSCOUT_REDDIT_MAX_RETRIES", "3")?;
    let reddit_backoff_base_ms = parse_u64("LEADSCOUT_REDDIT_BACKOFF_BASE_MS", "1000")?;

    if query_max == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LEADSCOUT_QUERY_MAX".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LEADSCOUT_PAGE_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let openai_base_url = or_default("LEADSCOUT_OPENAI_BASE_URL", "https://api.openai.com/v1/");
    let openai_model = or_default("LEADSCOUT_OPENAI_MODEL", "gpt-4o");
    let scorer_failure_policy =
        parse_failure_policy(&or_default("LEADSCOUT_SCORER_FAILURE_POLICY", "accept"))?;

    Ok(AppConfig {
        env,
        log_level,
        profile_path,
        reddit_client_id: optional("REDDIT_CLIENT_ID"),
        reddit_client_secret: optional("REDDIT_CLIENT_SECRET"),
        reddit_username: optional("REDDIT_USERNAME"),
        reddit_password: optional("REDDIT_PASSWORD"),
        openai_api_key: optional("OPENAI_API_KEY"),
        user_agent,
        request_timeout_secs,
        reddit_auth_url,
        reddit_api_url,
        query_max,
        page_size,
        inter_request_delay_ms,
        reddit_max_retries,
        reddit_backoff_base_ms,
        openai_base_url,
        openai_model,
        scorer_failure_policy,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LEADSCOUT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_failure_policy(s: &str) -> Result<ScorerFailurePolicy, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "accept" => Ok(ScorerFailurePolicy::AcceptAtThreshold),
        "reject" => Ok(ScorerFailurePolicy::Reject),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LEADSCOUT_SCORER_FAILURE_POLICY".to_string(),
            reason: format!("expected 'accept' or 'reject', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
