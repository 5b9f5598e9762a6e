//! Lead qualification pipeline.
//!
//! Collects posts per source, keeps the ones that mention a keyword, asks a
//! language model to score them against a fixed rubric, and promotes those
//! at or above the threshold to leads. Everything runs one step at a time:
//! one source, one post, one scorer call.

pub mod error;
pub mod export;
pub mod qualify;
pub mod report;
pub mod run;
pub mod scorer;

pub use error::{RunError, ScoringError};
pub use export::{export_file_name, leads_to_csv, leads_to_json, ExportFormat};
pub use qualify::{matched_keywords, qualify};
pub use report::{
    score_tier, select_explored, select_leads, ExploredQuery, ExploredSort, ExploredSummary,
    LeadQuery, LeadSort, LeadSummary, RecordStatus, ScoreBand, ScoreTier,
};
pub use run::{run, run_with_config, validate_request, RunOptions};
pub use scorer::{parse_score, OpenAiScorer, Scorer, ScorerSettings};
