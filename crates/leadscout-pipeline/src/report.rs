//! Read-only views over a finished run: summaries, filters, and sort orders
//! used by the report printer.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use leadscout_core::{ExploredRecord, Lead};

/// Scores at or above this count as high quality.
pub const HIGH_QUALITY_SCORE: u32 = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadSummary {
    pub total_leads: usize,
    /// `None` when there are no leads.
    pub average_score: Option<f64>,
    pub high_quality: usize,
    pub distinct_sources: usize,
    pub by_source: BTreeMap<String, usize>,
    pub by_score: BTreeMap<u32, usize>,
}

impl LeadSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_leads(leads: &[Lead]) -> Self {
        let mut by_source: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_score: BTreeMap<u32, usize> = BTreeMap::new();
        for lead in leads {
            *by_source.entry(lead.source.clone()).or_default() += 1;
            *by_score.entry(lead.relevance_score).or_default() += 1;
        }

        let total: u64 = leads.iter().map(|l| u64::from(l.relevance_score)).sum();
        let average_score = (!leads.is_empty()).then(|| total as f64 / leads.len() as f64);

        Self {
            total_leads: leads.len(),
            average_score,
            high_quality: leads
                .iter()
                .filter(|l| l.relevance_score >= HIGH_QUALITY_SCORE)
                .count(),
            distinct_sources: by_source.len(),
            by_source,
            by_score,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExploredSummary {
    pub total: usize,
    pub keyword_matches: usize,
    pub scored: usize,
    pub leads: usize,
    pub distinct_sources: usize,
}

impl ExploredSummary {
    #[must_use]
    pub fn from_records(records: &[ExploredRecord]) -> Self {
        let sources: BTreeSet<&str> = records.iter().map(|r| r.source.as_str()).collect();
        Self {
            total: records.len(),
            keyword_matches: records.iter().filter(|r| r.matched_keywords).count(),
            scored: records.iter().filter(|r| r.scored).count(),
            leads: records.iter().filter(|r| r.is_lead).count(),
            distinct_sources: sources.len(),
        }
    }
}

/// Display tier of a lead score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        })
    }
}

#[must_use]
pub fn score_tier(score: u32) -> ScoreTier {
    match score {
        s if s >= HIGH_QUALITY_SCORE => ScoreTier::High,
        s if s >= 6 => ScoreTier::Medium,
        _ => ScoreTier::Low,
    }
}

/// Inclusive score windows offered for lead filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreBand {
    #[default]
    All,
    EightToTen,
    SevenToNine,
    SixToEight,
}

impl ScoreBand {
    #[must_use]
    pub fn contains(self, score: u32) -> bool {
        match self {
            Self::All => true,
            Self::EightToTen => (8..=10).contains(&score),
            Self::SevenToNine => (7..=9).contains(&score),
            Self::SixToEight => (6..=8).contains(&score),
        }
    }
}

impl FromStr for ScoreBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            "8-10" => Ok(Self::EightToTen),
            "7-9" => Ok(Self::SevenToNine),
            "6-8" => Ok(Self::SixToEight),
            other => Err(format!(
                "unknown score band '{other}' (expected all, 8-10, 7-9, or 6-8)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeadSort {
    /// Highest score first.
    #[default]
    Score,
    /// Newest first.
    Date,
    /// Source name, A to Z.
    Source,
}

#[derive(Debug, Clone, Default)]
pub struct LeadQuery {
    pub source: Option<String>,
    pub band: ScoreBand,
    pub sort: LeadSort,
}

/// Leads matching `query`, in its sort order. Ties keep run order.
#[must_use]
pub fn select_leads<'a>(leads: &'a [Lead], query: &LeadQuery) -> Vec<&'a Lead> {
    let mut selected: Vec<&Lead> = leads
        .iter()
        .filter(|l| source_matches(query.source.as_deref(), &l.source))
        .filter(|l| query.band.contains(l.relevance_score))
        .collect();

    match query.sort {
        LeadSort::Score => selected.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score)),
        LeadSort::Date => selected.sort_by(|a, b| b.date.cmp(&a.date)),
        LeadSort::Source => selected.sort_by(|a, b| a.source.cmp(&b.source)),
    }
    selected
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordStatus {
    #[default]
    All,
    KeywordMatch,
    Scored,
    Leads,
    NonLeads,
}

impl RecordStatus {
    fn admits(self, record: &ExploredRecord) -> bool {
        match self {
            Self::All => true,
            Self::KeywordMatch => record.matched_keywords,
            Self::Scored => record.scored,
            Self::Leads => record.is_lead,
            Self::NonLeads => !record.is_lead,
        }
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            "keyword-match" => Ok(Self::KeywordMatch),
            "scored" => Ok(Self::Scored),
            "leads" => Ok(Self::Leads),
            "non-leads" => Ok(Self::NonLeads),
            other => Err(format!(
                "unknown record status '{other}' (expected all, keyword-match, scored, leads, or non-leads)"
            )),
        }
    }
}

/// All explored orders are descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExploredSort {
    #[default]
    Date,
    Popularity,
    Comments,
}

#[derive(Debug, Clone, Default)]
pub struct ExploredQuery {
    pub source: Option<String>,
    pub status: RecordStatus,
    pub sort: ExploredSort,
}

#[must_use]
pub fn select_explored<'a>(
    records: &'a [ExploredRecord],
    query: &ExploredQuery,
) -> Vec<&'a ExploredRecord> {
    let mut selected: Vec<&ExploredRecord> = records
        .iter()
        .filter(|r| source_matches(query.source.as_deref(), &r.source))
        .filter(|r| query.status.admits(r))
        .collect();

    match query.sort {
        ExploredSort::Date => selected.sort_by(|a, b| b.date.cmp(&a.date)),
        ExploredSort::Popularity => selected.sort_by(|a, b| b.popularity.cmp(&a.popularity)),
        ExploredSort::Comments => selected.sort_by(|a, b| b.comment_count.cmp(&a.comment_count)),
    }
    selected
}

fn source_matches(wanted: Option<&str>, source: &str) -> bool {
    wanted.is_none_or(|w| w.eq_ignore_ascii_case(source))
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
