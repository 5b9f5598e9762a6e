//! `run` and `profile` command handlers.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use leadscout_core::{load_search_profile_or_default, AppConfig, ProgressEvent, SearchProfile};
use leadscout_pipeline::{
    run_with_config, ExploredQuery, ExploredSort, LeadQuery, LeadSort, RecordStatus, ScoreBand,
};

use crate::export::{write_exports, ExportChoice};
use crate::report::print_run_report;

/// Search-profile overrides shared by `run` and `profile`.
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileOverrides {
    /// Subreddit to scan (repeatable; replaces the profile's list)
    #[arg(long = "source", value_name = "NAME")]
    pub sources: Vec<String>,

    /// Keyword phrase to match (repeatable; replaces the profile's list)
    #[arg(long = "keyword", value_name = "PHRASE")]
    pub keywords: Vec<String>,

    /// Maximum posts collected per subreddit
    #[arg(long)]
    pub per_source_cap: Option<usize>,

    /// Minimum score for a post to count as a lead (1-10)
    #[arg(long)]
    pub min_score: Option<u32>,
}

impl ProfileOverrides {
    pub(crate) fn apply(&self, mut profile: SearchProfile) -> SearchProfile {
        if !self.sources.is_empty() {
            profile.sources.clone_from(&self.sources);
        }
        if !self.keywords.is_empty() {
            profile.keywords.clone_from(&self.keywords);
        }
        if let Some(cap) = self.per_source_cap {
            profile.per_source_cap = cap;
        }
        if let Some(min_score) = self.min_score {
            profile.min_score = min_score;
        }
        profile.normalized()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Score,
    Date,
    Source,
}

impl From<SortArg> for LeadSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Score => LeadSort::Score,
            SortArg::Date => LeadSort::Date,
            SortArg::Source => LeadSort::Source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExploredSortArg {
    Date,
    Popularity,
    Comments,
}

impl From<ExploredSortArg> for ExploredSort {
    fn from(arg: ExploredSortArg) -> Self {
        match arg {
            ExploredSortArg::Date => ExploredSort::Date,
            ExploredSortArg::Popularity => ExploredSort::Popularity,
            ExploredSortArg::Comments => ExploredSort::Comments,
        }
    }
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub overrides: ProfileOverrides,

    /// Write lead exports into this directory
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Export format
    #[arg(long, value_enum, default_value = "both")]
    pub format: ExportChoice,

    /// Only list leads in this score band: all, 8-10, 7-9, 6-8
    #[arg(long, default_value = "all")]
    pub score_band: ScoreBand,

    /// Only list leads from this subreddit
    #[arg(long, value_name = "NAME")]
    pub lead_source: Option<String>,

    /// Lead list order
    #[arg(long, value_enum, default_value = "score")]
    pub sort: SortArg,

    /// Also list every explored post
    #[arg(long)]
    pub show_explored: bool,

    /// Explored list filter: all, keyword-match, scored, leads, non-leads
    #[arg(long, default_value = "all")]
    pub explored_status: RecordStatus,

    /// Explored list order, newest or highest first
    #[arg(long, value_enum, default_value = "date")]
    pub explored_sort: ExploredSortArg,

    /// Only list explored posts from this subreddit
    #[arg(long, value_name = "NAME")]
    pub explored_source: Option<String>,
}

impl RunArgs {
    /// Explored-list query, or `None` unless `--show-explored` was given.
    pub(crate) fn explored_query(&self) -> Option<ExploredQuery> {
        self.show_explored.then(|| ExploredQuery {
            source: self.explored_source.clone(),
            status: self.explored_status,
            sort: self.explored_sort.into(),
        })
    }
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub overrides: ProfileOverrides,
}

/// Profile file (or defaults) with command-line overrides applied.
///
/// # Errors
///
/// Returns an error if the profile file exists but cannot be loaded.
pub(crate) fn effective_profile(
    config: &AppConfig,
    overrides: &ProfileOverrides,
) -> anyhow::Result<SearchProfile> {
    let profile = load_search_profile_or_default(&config.profile_path)?;
    Ok(overrides.apply(profile))
}

/// Execute a full run and print the report.
///
/// # Errors
///
/// Returns an error if inputs or credentials are invalid, authentication
/// fails, or an export cannot be written. Failures inside the run are
/// reported as warnings and do not abort it.
pub(crate) async fn run_command(config: &AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    let profile = effective_profile(config, &args.overrides)?;
    tracing::info!(
        env = %config.env,
        sources = profile.sources.len(),
        keywords = profile.keywords.len(),
        per_source_cap = profile.per_source_cap,
        min_score = profile.min_score,
        policy = %config.scorer_failure_policy,
        "starting run"
    );

    let mut progress: Vec<ProgressEvent> = Vec::new();
    let result = run_with_config(config, &profile, &mut progress).await?;

    let lead_query = LeadQuery {
        source: args.lead_source.clone(),
        band: args.score_band,
        sort: args.sort.into(),
    };
    let explored_query = args.explored_query();
    print_run_report(&result, &progress, &lead_query, explored_query.as_ref());

    if let Some(dir) = &args.export_dir {
        for path in write_exports(&result.leads, dir, args.format, chrono::Utc::now())? {
            println!("exported {}", path.display());
        }
    }

    Ok(())
}

/// Print the effective profile as YAML.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded, is invalid, or cannot be
/// rendered.
pub(crate) fn print_profile(config: &AppConfig, args: &ProfileArgs) -> anyhow::Result<()> {
    let profile = effective_profile(config, &args.overrides)?;
    profile.validate()?;
    println!("# profile file: {}", config.profile_path.display());
    print!("{}", serde_yaml::to_string(&profile)?);
    Ok(())
}
