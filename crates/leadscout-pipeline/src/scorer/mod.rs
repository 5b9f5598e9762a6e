//! Relevance scoring: prompt construction, the scoring service client, and
//! extraction of the numeric score from free-form replies.

mod openai;
mod parse;
mod prompt;

use std::future::Future;

pub use openai::{OpenAiScorer, ScorerSettings};
pub use parse::parse_score;
pub use prompt::{build_prompt, SCORING_INSTRUCTIONS};

use crate::error::ScoringError;

/// A service that reads a qualification prompt and answers in free text.
///
/// The reply is expected, but not guaranteed, to contain a `Score: N` line.
pub trait Scorer {
    fn score(&self, prompt: &str) -> impl Future<Output = Result<String, ScoringError>>;
}
