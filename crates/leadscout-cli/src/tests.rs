use clap::Parser;
use leadscout_core::SearchProfile;
use leadscout_pipeline::{ExploredSort, RecordStatus, ScoreBand};

use super::*;
use crate::export::ExportChoice;
use crate::run::{ExploredSortArg, ProfileOverrides, SortArg};

#[test]
fn parses_run_with_defaults() {
    let cli = Cli::try_parse_from(["leadscout", "run"]).expect("expected valid cli args");

    let Commands::Run(args) = cli.command else {
        panic!("expected run command");
    };
    assert!(args.overrides.sources.is_empty());
    assert!(args.overrides.keywords.is_empty());
    assert_eq!(args.overrides.per_source_cap, None);
    assert_eq!(args.overrides.min_score, None);
    assert_eq!(args.format, ExportChoice::Both);
    assert_eq!(args.score_band, ScoreBand::All);
    assert_eq!(args.sort, SortArg::Score);
    assert_eq!(args.explored_status, RecordStatus::All);
    assert!(args.export_dir.is_none());
    assert!(!args.show_explored);
    assert_eq!(args.explored_sort, ExploredSortArg::Date);
    assert!(args.explored_source.is_none());
    assert!(args.explored_query().is_none());
}

#[test]
fn parses_run_with_repeated_sources_and_keywords() {
    let cli = Cli::try_parse_from([
        "leadscout",
        "run",
        "--source",
        "excel",
        "--source",
        "r/PowerBI",
        "--keyword",
        "KPI tracking",
        "--per-source-cap",
        "1500",
        "--min-score",
        "8",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Commands::Run(run::RunArgs {
            overrides: ProfileOverrides {
                ref sources,
                ref keywords,
                per_source_cap: Some(1500),
                min_score: Some(8),
            },
            ..
        }) if sources == &["excel", "r/PowerBI"] && keywords == &["KPI tracking"]
    ));
}

#[test]
fn parses_report_and_export_flags() {
    let cli = Cli::try_parse_from([
        "leadscout",
        "run",
        "--export-dir",
        "out",
        "--format",
        "csv",
        "--score-band",
        "8-10",
        "--sort",
        "date",
        "--show-explored",
        "--explored-status",
        "non-leads",
    ])
    .unwrap();

    let Commands::Run(args) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.export_dir.as_deref(), Some(std::path::Path::new("out")));
    assert_eq!(args.format, ExportChoice::Csv);
    assert_eq!(args.score_band, ScoreBand::EightToTen);
    assert_eq!(args.sort, SortArg::Date);
    assert!(args.show_explored);
    assert_eq!(args.explored_status, RecordStatus::NonLeads);
}

#[test]
fn explored_sort_and_source_reach_the_query() {
    let cli = Cli::try_parse_from([
        "leadscout",
        "run",
        "--show-explored",
        "--explored-sort",
        "comments",
        "--explored-source",
        "PowerBI",
        "--explored-status",
        "scored",
    ])
    .unwrap();

    let Commands::Run(args) = cli.command else {
        panic!("expected run command");
    };
    let query = args.explored_query().expect("explored list requested");
    assert_eq!(query.sort, ExploredSort::Comments);
    assert_eq!(query.source.as_deref(), Some("PowerBI"));
    assert_eq!(query.status, RecordStatus::Scored);
}

#[test]
fn explored_sort_accepts_popularity_and_rejects_unknown() {
    let cli =
        Cli::try_parse_from(["leadscout", "run", "--show-explored", "--explored-sort", "popularity"])
            .unwrap();
    let Commands::Run(args) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(
        args.explored_query().map(|q| q.sort),
        Some(ExploredSort::Popularity)
    );

    assert!(Cli::try_parse_from(["leadscout", "run", "--explored-sort", "score"]).is_err());
}

#[test]
fn rejects_unknown_score_band() {
    assert!(Cli::try_parse_from(["leadscout", "run", "--score-band", "5-7"]).is_err());
}

#[test]
fn rejects_non_numeric_min_score() {
    assert!(Cli::try_parse_from(["leadscout", "run", "--min-score", "high"]).is_err());
}

#[test]
fn parses_profile_command() {
    let cli = Cli::try_parse_from(["leadscout", "profile", "--keyword", "BI dashboard"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Profile(run::ProfileArgs {
            overrides: ProfileOverrides { ref keywords, .. }
        }) if keywords == &["BI dashboard"]
    ));
}

#[test]
fn command_is_required() {
    assert!(Cli::try_parse_from(["leadscout"]).is_err());
}

#[test]
fn overrides_replace_lists_and_normalize() {
    let overrides = ProfileOverrides {
        sources: vec!["r/excel".into(), "Excel".into(), " tableau ".into()],
        keywords: vec![],
        per_source_cap: Some(200),
        min_score: None,
    };

    let profile = overrides.apply(SearchProfile::default());

    assert_eq!(profile.sources, vec!["excel", "tableau"]);
    assert_eq!(profile.keywords, SearchProfile::default().keywords);
    assert_eq!(profile.per_source_cap, 200);
    assert_eq!(profile.min_score, 7);
}
