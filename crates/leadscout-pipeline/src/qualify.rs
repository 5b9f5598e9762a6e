//! Keyword filtering and scoring of collected items.

use leadscout_core::{
    ExploredRecord, Item, Lead, ProgressSink, RunResult, RunStats, ScorerFailurePolicy,
};

use crate::scorer::{build_prompt, parse_score, Scorer};

pub const PREVIEW_CHARS: usize = 200;
pub const LEAD_CONTENT_CHARS: usize = 300;
pub const RATIONALE_CHARS: usize = 400;

pub const FALLBACK_RATIONALE: &str = "keyword match only, scoring unavailable";
pub const UNAVAILABLE_RATIONALE: &str = "scoring unavailable";

/// Keywords whose lowercase form occurs in the lowercased title or body,
/// in keyword order.
#[must_use]
pub fn matched_keywords<'k>(item: &Item, keywords: &'k [String]) -> Vec<&'k str> {
    let title = item.title.to_lowercase();
    let body = item.body_text().to_lowercase();
    keywords
        .iter()
        .filter(|keyword| {
            let needle = keyword.to_lowercase();
            title.contains(&needle) || body.contains(&needle)
        })
        .map(String::as_str)
        .collect()
}

enum Verdict {
    Scored { score: u32, rationale: String },
    Unavailable,
}

/// Run every item through the keyword filter and, on a match, the scorer.
///
/// Returns one explored record per item in input order, and a lead for each
/// item whose final score reaches `min_score`. `total_fetched` is the number
/// of items given.
///
/// A reply without a readable score counts as `min_score`. When the scorer
/// call fails, `policy` decides: accept at `min_score`, or record the item as
/// scored with no score and no lead.
pub async fn qualify<S, P>(
    scorer: &S,
    items: &[Item],
    keywords: &[String],
    min_score: u32,
    policy: ScorerFailurePolicy,
    progress: &mut P,
) -> RunResult
where
    S: Scorer,
    P: ProgressSink + ?Sized,
{
    let mut result = RunResult {
        stats: RunStats {
            total_fetched: items.len(),
            ..RunStats::default()
        },
        ..RunResult::default()
    };

    for item in items {
        let mut record = explored_shell(item);
        let matched = matched_keywords(item, keywords);
        if matched.is_empty() {
            result.explored.push(record);
            continue;
        }
        record.matched_keywords = true;
        result.stats.analyzed += 1;

        let verdict = match scorer.score(&build_prompt(item)).await {
            Ok(reply) => {
                let score = parse_score(&reply).unwrap_or_else(|| {
                    progress.warning(format!(
                        "Unreadable score for post {} in r/{}; using {min_score}",
                        item.id, item.source
                    ));
                    min_score
                });
                if !(1..=10).contains(&score) {
                    tracing::warn!(item_id = %item.id, score, "score outside 1-10 passed through");
                }
                Verdict::Scored {
                    score,
                    rationale: reply.chars().take(RATIONALE_CHARS).collect(),
                }
            }
            Err(e) => {
                progress.warning(format!(
                    "Scoring failed for post {} in r/{}: {e}",
                    item.id, item.source
                ));
                match policy {
                    ScorerFailurePolicy::AcceptAtThreshold => Verdict::Scored {
                        score: min_score,
                        rationale: FALLBACK_RATIONALE.to_string(),
                    },
                    ScorerFailurePolicy::Reject => Verdict::Unavailable,
                }
            }
        };

        record.scored = true;
        match verdict {
            Verdict::Scored { score, rationale } => {
                record.score = Some(score);
                record.rationale = Some(rationale.clone());
                tracing::debug!(item_id = %item.id, score, "scored post");
                if score >= min_score {
                    record.is_lead = true;
                    result.stats.leads_found += 1;
                    result.leads.push(Lead {
                        author: item.author_or_placeholder().to_string(),
                        title: item.title.clone(),
                        url: item.url.clone(),
                        content: item.body_text().chars().take(LEAD_CONTENT_CHARS).collect(),
                        source: item.source.clone(),
                        relevance_score: score,
                        matched_keywords: matched.iter().map(ToString::to_string).collect(),
                        date: item.created_date(),
                        rationale,
                    });
                }
            }
            Verdict::Unavailable => {
                record.rationale = Some(UNAVAILABLE_RATIONALE.to_string());
            }
        }
        result.explored.push(record);
    }

    result
}

fn explored_shell(item: &Item) -> ExploredRecord {
    ExploredRecord {
        item_id: item.id.clone(),
        title: item.title.clone(),
        url: item.url.clone(),
        author: item.author_or_placeholder().to_string(),
        source: item.source.clone(),
        date: item.created_date(),
        popularity: item.popularity,
        comment_count: item.comment_count,
        content_preview: item.body_text().chars().take(PREVIEW_CHARS).collect(),
        matched_keywords: false,
        scored: false,
        is_lead: false,
        score: None,
        rationale: None,
    }
}

#[cfg(test)]
#[path = "qualify_test.rs"]
mod tests;
