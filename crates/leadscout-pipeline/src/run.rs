//! End-to-end run orchestration: collect then qualify, one source at a time.

use leadscout_core::{
    AppConfig, ConfigError, ProgressSink, RunResult, ScorerFailurePolicy, SearchProfile,
};
use leadscout_reddit::{collect, ContentSource, RedditClient, RedditSettings};

use crate::error::RunError;
use crate::qualify::qualify;
use crate::scorer::{OpenAiScorer, Scorer, ScorerSettings};

/// Tunables that come from the application config rather than the profile.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Largest number of posts a single listing query may return.
    pub query_max: usize,
    pub failure_policy: ScorerFailurePolicy,
}

impl RunOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            query_max: config.query_max,
            failure_policy: config.scorer_failure_policy,
        }
    }
}

/// Check the run inputs without touching the network.
///
/// # Errors
///
/// Returns [`RunError::InvalidInput`] for empty source or keyword lists, a
/// zero or oversized cap, or a minimum score outside 1-10.
pub fn validate_request(profile: &SearchProfile) -> Result<(), RunError> {
    profile.validate().map_err(|e| match e {
        ConfigError::Validation(msg) => RunError::InvalidInput(msg),
        other => RunError::Config(other),
    })
}

/// Run the pipeline over every source in `profile`, in order.
///
/// Sources are processed to completion one after another. A source that
/// yields nothing is reported as a warning and the run moves on.
///
/// # Errors
///
/// Only input validation can fail; nothing is fetched when it does.
pub async fn run<C, S, P>(
    content: &C,
    scorer: &S,
    profile: &SearchProfile,
    options: RunOptions,
    progress: &mut P,
) -> Result<RunResult, RunError>
where
    C: ContentSource,
    S: Scorer,
    P: ProgressSink + ?Sized,
{
    validate_request(profile)?;

    let mut result = RunResult::default();

    for source in &profile.sources {
        progress.status(format!("Searching in r/{source}..."));

        let items = collect(
            content,
            source,
            profile.per_source_cap,
            options.query_max,
            progress,
        )
        .await;

        if items.is_empty() {
            progress.warning(format!("No posts retrieved from r/{source}"));
            continue;
        }

        progress.status(format!(
            "Total {} posts fetched from r/{source}. Analyzing...",
            items.len()
        ));

        let partial = qualify(
            scorer,
            &items,
            &profile.keywords,
            profile.min_score,
            options.failure_policy,
            progress,
        )
        .await;

        tracing::info!(
            source = %source,
            fetched = partial.stats.total_fetched,
            analyzed = partial.stats.analyzed,
            leads = partial.stats.leads_found,
            "source complete"
        );

        result.leads.extend(partial.leads);
        result.explored.extend(partial.explored);
        result.stats.absorb(partial.stats);
    }

    progress.status(format!(
        "Search completed! Found {} leads from {} posts.",
        result.stats.leads_found, result.stats.total_fetched
    ));

    Ok(result)
}

/// Validate inputs and credentials, connect the live clients, and run.
///
/// # Errors
///
/// - [`RunError::InvalidInput`] or [`RunError::Config`] before any network
///   call when the profile or credentials are unusable.
/// - [`RunError::Scoring`] if the scoring client cannot be built.
/// - [`RunError::Reddit`] if authentication with the content source fails.
pub async fn run_with_config<P>(
    config: &AppConfig,
    profile: &SearchProfile,
    progress: &mut P,
) -> Result<RunResult, RunError>
where
    P: ProgressSink + ?Sized,
{
    validate_request(profile)?;
    let credentials = config.credentials()?;

    let scorer = OpenAiScorer::new(&ScorerSettings::from_app_config(config, &credentials))?;
    let reddit =
        RedditClient::connect(&RedditSettings::from_app_config(config), &credentials).await?;

    run(
        &reddit,
        &scorer,
        profile,
        RunOptions::from_app_config(config),
        progress,
    )
    .await
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
