use std::cell::RefCell;
use std::collections::VecDeque;

use chrono::{TimeZone, Utc};
use leadscout_core::{Item, ProgressEvent, ScorerFailurePolicy};

use super::*;
use crate::error::ScoringError;
use crate::scorer::Scorer;

/// Replays canned replies in order; `Err` entries simulate a failed call.
struct ScriptedScorer {
    replies: RefCell<VecDeque<Result<String, u16>>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedScorer {
    fn new(replies: Vec<Result<&str, u16>>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().map(|r| r.map(String::from)).collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl Scorer for ScriptedScorer {
    async fn score(&self, prompt: &str) -> Result<String, ScoringError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match self.replies.borrow_mut().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(status)) => Err(ScoringError::UnexpectedStatus {
                status,
                body: "unavailable".into(),
            }),
            None => Err(ScoringError::EmptyResponse),
        }
    }
}

fn item(id: &str, title: &str, body: Option<&str>) -> Item {
    Item {
        id: id.into(),
        title: title.into(),
        body: body.map(Into::into),
        author: Some(format!("author_{id}")),
        source: "analytics".into(),
        popularity: 10,
        comment_count: 2,
        created_at: Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap(),
        url: format!("https://reddit.com/r/analytics/comments/{id}/"),
    }
}

fn keywords(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn lead_ids(result: &RunResult) -> Vec<&str> {
    result
        .leads
        .iter()
        .map(|lead| lead.url.rsplit('/').nth(1).unwrap_or_default())
        .collect()
}

fn assert_lead_invariant(result: &RunResult, min_score: u32) {
    let flagged = result.explored.iter().filter(|r| r.is_lead).count();
    assert_eq!(result.leads.len(), flagged);
    assert_eq!(result.stats.leads_found, flagged);
    assert!(result.leads.iter().all(|l| l.relevance_score >= min_score));
}

#[test]
fn keyword_match_is_case_insensitive_over_title_and_body() {
    let kws = keywords(&["bi dashboard", "KPI tracking"]);

    let by_title = item("1", "Need a BI Dashboard", None);
    assert_eq!(matched_keywords(&by_title, &kws), vec!["bi dashboard"]);

    let by_body = item("2", "Help", Some("we want kpi TRACKING for the board"));
    assert_eq!(matched_keywords(&by_body, &kws), vec!["KPI tracking"]);

    let neither = item("3", "Pivot table question", Some("homework"));
    assert!(matched_keywords(&neither, &kws).is_empty());
}

#[tokio::test]
async fn mixed_scores_promote_threshold_and_fallback() {
    let items = vec![
        item("1", "business intelligence rollout", None),
        item("2", "business intelligence for class", None),
        item("3", "business intelligence at work", None),
        item("4", "business intelligence budget", None),
    ];
    let scorer = ScriptedScorer::new(vec![
        Ok("Score: 9\nRecommendation: LEAD"),
        Ok("Score: 5"),
        Ok("Score: 7 (decent)"),
        Ok("I cannot rate this one."),
    ]);
    let mut progress: Vec<ProgressEvent> = Vec::new();

    let result = qualify(
        &scorer,
        &items,
        &keywords(&["business intelligence"]),
        7,
        ScorerFailurePolicy::AcceptAtThreshold,
        &mut progress,
    )
    .await;

    assert_eq!(lead_ids(&result), vec!["1", "3", "4"]);
    assert_eq!(result.leads[2].relevance_score, 7);
    assert_eq!(result.explored[1].score, Some(5));
    assert!(!result.explored[1].is_lead);
    assert_eq!(result.stats.total_fetched, 4);
    assert_eq!(result.stats.analyzed, 4);
    assert_eq!(result.stats.leads_found, 3);
    assert_eq!(progress.len(), 1);
    assert!(progress[0].is_warning());
    assert_lead_invariant(&result, 7);
}

#[tokio::test]
async fn unmatched_items_are_explored_but_never_scored() {
    let items = vec![
        item("1", "Excel shortcut tips", Some("ctrl+shift+L")),
        item("2", "Company needs analytics", None),
    ];
    let scorer = ScriptedScorer::new(vec![Ok("Score: 8")]);
    let mut progress: Vec<ProgressEvent> = Vec::new();

    let result = qualify(
        &scorer,
        &items,
        &keywords(&["company needs analytics"]),
        7,
        ScorerFailurePolicy::AcceptAtThreshold,
        &mut progress,
    )
    .await;

    assert_eq!(scorer.calls(), 1);
    assert_eq!(result.explored.len(), 2);
    let skipped = &result.explored[0];
    assert!(!skipped.matched_keywords);
    assert!(!skipped.scored);
    assert!(skipped.score.is_none());
    assert!(skipped.rationale.is_none());
    assert_eq!(result.stats.analyzed, 1);
    assert_eq!(result.leads[0].matched_keywords, vec!["company needs analytics"]);
}

#[tokio::test]
async fn scorer_failure_accepts_at_threshold_by_default() {
    let items = vec![item("1", "KPI tracking for our stores", None)];
    let scorer = ScriptedScorer::new(vec![Err(503)]);
    let mut progress: Vec<ProgressEvent> = Vec::new();

    let result = qualify(
        &scorer,
        &items,
        &keywords(&["kpi tracking"]),
        6,
        ScorerFailurePolicy::AcceptAtThreshold,
        &mut progress,
    )
    .await;

    assert_eq!(result.leads.len(), 1);
    assert_eq!(result.leads[0].relevance_score, 6);
    assert_eq!(result.leads[0].rationale, FALLBACK_RATIONALE);
    assert!(result.explored[0].scored);
    assert!(result.explored[0].is_lead);
    assert_eq!(result.stats.leads_found, 1);
    assert!(progress[0].message().contains("Scoring failed for post 1"));
    assert_lead_invariant(&result, 6);
}

#[tokio::test]
async fn scorer_failure_with_reject_policy_produces_no_lead() {
    let items = vec![item("1", "KPI tracking for our stores", None)];
    let scorer = ScriptedScorer::new(vec![Err(500)]);
    let mut progress: Vec<ProgressEvent> = Vec::new();

    let result = qualify(
        &scorer,
        &items,
        &keywords(&["kpi tracking"]),
        6,
        ScorerFailurePolicy::Reject,
        &mut progress,
    )
    .await;

    assert!(result.leads.is_empty());
    let record = &result.explored[0];
    assert!(record.scored);
    assert!(!record.is_lead);
    assert!(record.score.is_none());
    assert_eq!(record.rationale.as_deref(), Some(UNAVAILABLE_RATIONALE));
    assert_eq!(result.stats.analyzed, 1);
    assert_eq!(result.stats.leads_found, 0);
}

#[tokio::test]
async fn min_score_one_accepts_every_scored_item() {
    let items = vec![
        item("1", "business reporting", None),
        item("2", "business reporting", None),
    ];
    let scorer = ScriptedScorer::new(vec![Ok("Score: 1"), Ok("Score: 2")]);
    let mut progress: Vec<ProgressEvent> = Vec::new();

    let result = qualify(
        &scorer,
        &items,
        &keywords(&["business reporting"]),
        1,
        ScorerFailurePolicy::AcceptAtThreshold,
        &mut progress,
    )
    .await;

    assert_eq!(result.leads.len(), 2);
    assert_lead_invariant(&result, 1);
}

#[tokio::test]
async fn min_score_ten_accepts_only_perfect_scores() {
    let items = vec![
        item("1", "executive reporting", None),
        item("2", "executive reporting", None),
        item("3", "executive reporting", None),
    ];
    let scorer = ScriptedScorer::new(vec![Ok("Score: 9"), Ok("Score: 10"), Ok("no score")]);
    let mut progress: Vec<ProgressEvent> = Vec::new();

    let result = qualify(
        &scorer,
        &items,
        &keywords(&["executive reporting"]),
        10,
        ScorerFailurePolicy::AcceptAtThreshold,
        &mut progress,
    )
    .await;

    assert_eq!(lead_ids(&result), vec!["2", "3"]);
    assert_lead_invariant(&result, 10);
}

#[tokio::test]
async fn out_of_range_score_passes_through() {
    let items = vec![item("1", "corporate dashboard", None)];
    let scorer = ScriptedScorer::new(vec![Ok("Score: 8/10")]);
    let mut progress: Vec<ProgressEvent> = Vec::new();

    let result = qualify(
        &scorer,
        &items,
        &keywords(&["corporate dashboard"]),
        7,
        ScorerFailurePolicy::AcceptAtThreshold,
        &mut progress,
    )
    .await;

    assert_eq!(result.leads[0].relevance_score, 810);
    assert!(progress.is_empty());
}

#[tokio::test]
async fn timestamp_on_score_line_saturates_instead_of_falling_back() {
    let items = vec![item("1", "corporate dashboard", None)];
    let scorer = ScriptedScorer::new(vec![Ok("Score: 7 (reviewed 2025-03-09 12:00)")]);
    let mut progress: Vec<ProgressEvent> = Vec::new();

    let result = qualify(
        &scorer,
        &items,
        &keywords(&["corporate dashboard"]),
        7,
        ScorerFailurePolicy::AcceptAtThreshold,
        &mut progress,
    )
    .await;

    assert_eq!(result.leads[0].relevance_score, u32::MAX);
    assert!(progress.is_empty());
}

#[tokio::test]
async fn long_fields_are_truncated() {
    let body = "b".repeat(1000);
    let reply = format!("Score: 9\n{}", "r".repeat(1000));
    let items = vec![item("1", "management reporting", Some(&body))];
    let scorer = ScriptedScorer::new(vec![Ok(reply.as_str())]);
    let mut progress: Vec<ProgressEvent> = Vec::new();

    let result = qualify(
        &scorer,
        &items,
        &keywords(&["management reporting"]),
        7,
        ScorerFailurePolicy::AcceptAtThreshold,
        &mut progress,
    )
    .await;

    let record = &result.explored[0];
    assert_eq!(record.content_preview.chars().count(), PREVIEW_CHARS);
    assert_eq!(
        record.rationale.as_deref().map(|r| r.chars().count()),
        Some(RATIONALE_CHARS)
    );
    let lead = &result.leads[0];
    assert_eq!(lead.content.chars().count(), LEAD_CONTENT_CHARS);
    assert_eq!(lead.rationale.chars().count(), RATIONALE_CHARS);
    assert_eq!(lead.author, "author_1");
    assert_eq!(lead.date, "2025-03-09");
}

#[tokio::test]
async fn output_preserves_input_order() {
    let items: Vec<Item> = (0..5)
        .map(|i| item(&i.to_string(), "business metrics", None))
        .collect();
    let scorer = ScriptedScorer::new(vec![Ok("Score: 8"); 5]);
    let mut progress: Vec<ProgressEvent> = Vec::new();

    let result = qualify(
        &scorer,
        &items,
        &keywords(&["business metrics"]),
        7,
        ScorerFailurePolicy::AcceptAtThreshold,
        &mut progress,
    )
    .await;

    let explored: Vec<&str> = result.explored.iter().map(|r| r.item_id.as_str()).collect();
    assert_eq!(explored, vec!["0", "1", "2", "3", "4"]);
    assert_eq!(lead_ids(&result), vec!["0", "1", "2", "3", "4"]);
}
