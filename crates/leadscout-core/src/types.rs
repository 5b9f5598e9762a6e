//! Domain types shared by the collector, the qualifier, and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display value used wherever an item has no author handle.
pub const AUTHOR_PLACEHOLDER: &str = "N/A";

/// Ranking strategy used to page through a source beyond a single query's cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ranking {
    /// Most recent first.
    New,
    /// Highest-ranked over the source's whole history.
    TopAllTime,
    /// Currently trending.
    Trending,
}

impl Ranking {
    /// Collection order: recent, then all-time top, then trending.
    pub const COLLECTION_ORDER: [Ranking; 3] =
        [Ranking::New, Ranking::TopAllTime, Ranking::Trending];

    /// Listing path segment on the content API.
    #[must_use]
    pub fn listing_path(self) -> &'static str {
        match self {
            Ranking::New => "new",
            Ranking::TopAllTime => "top",
            Ranking::Trending => "hot",
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ranking::New => write!(f, "new"),
            Ranking::TopAllTime => write!(f, "top-all-time"),
            Ranking::Trending => write!(f, "trending"),
        }
    }
}

/// One post retrieved from a source. Never mutated after collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    /// Self-text. `None` for link posts and empty bodies.
    pub body: Option<String>,
    /// `None` when the account was deleted or the API omitted it.
    pub author: Option<String>,
    /// Source the item was collected from, as requested by the caller.
    pub source: String,
    pub popularity: i64,
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
    pub url: String,
}

impl Item {
    /// Author handle, or [`AUTHOR_PLACEHOLDER`] when absent.
    #[must_use]
    pub fn author_or_placeholder(&self) -> &str {
        self.author.as_deref().unwrap_or(AUTHOR_PLACEHOLDER)
    }

    /// Body text, or the empty string when absent.
    #[must_use]
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    /// Creation date formatted as `YYYY-MM-DD`.
    #[must_use]
    pub fn created_date(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}

/// An item as seen by the qualifier, with pipeline annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploredRecord {
    pub item_id: String,
    pub title: String,
    pub url: String,
    pub author: String,
    pub source: String,
    pub date: String,
    pub popularity: i64,
    pub comment_count: u64,
    pub content_preview: String,
    pub matched_keywords: bool,
    /// Sent to the scorer (whether or not the call succeeded).
    pub scored: bool,
    pub is_lead: bool,
    pub score: Option<u32>,
    pub rationale: Option<String>,
}

/// A qualified prospect. The primary output artifact of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub author: String,
    pub title: String,
    pub url: String,
    pub content: String,
    pub source: String,
    pub relevance_score: u32,
    pub matched_keywords: Vec<String>,
    pub date: String,
    pub rationale: String,
}

/// Monotonic counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub total_fetched: usize,
    /// Keyword-matched items.
    pub analyzed: usize,
    pub leads_found: usize,
}

impl RunStats {
    /// Add another set of counters into this one.
    pub fn absorb(&mut self, other: RunStats) {
        self.total_fetched += other.total_fetched;
        self.analyzed += other.analyzed;
        self.leads_found += other.leads_found;
    }
}

/// Everything a run produces, held by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub leads: Vec<Lead>,
    pub explored: Vec<ExploredRecord>,
    pub stats: RunStats,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn item(author: Option<&str>, body: Option<&str>) -> Item {
        Item {
            id: "abc".to_string(),
            title: "Need a BI Dashboard".to_string(),
            body: body.map(ToString::to_string),
            author: author.map(ToString::to_string),
            source: "analytics".to_string(),
            popularity: 12,
            comment_count: 3,
            created_at: Utc.with_ymd_and_hms(2025, 3, 9, 22, 15, 0).unwrap(),
            url: "https://reddit.com/r/analytics/comments/abc/".to_string(),
        }
    }

    #[test]
    fn author_placeholder_when_absent() {
        assert_eq!(item(None, None).author_or_placeholder(), "N/A");
        assert_eq!(item(Some("jane"), None).author_or_placeholder(), "jane");
    }

    #[test]
    fn body_text_defaults_to_empty() {
        assert_eq!(item(None, None).body_text(), "");
        assert_eq!(item(None, Some("hello")).body_text(), "hello");
    }

    #[test]
    fn created_date_is_utc_day() {
        assert_eq!(item(None, None).created_date(), "2025-03-09");
    }

    #[test]
    fn ranking_paths_and_labels() {
        assert_eq!(Ranking::New.listing_path(), "new");
        assert_eq!(Ranking::TopAllTime.listing_path(), "top");
        assert_eq!(Ranking::Trending.listing_path(), "hot");
        assert_eq!(Ranking::TopAllTime.to_string(), "top-all-time");
    }

    #[test]
    fn ranking_serializes_kebab_case() {
        let json = serde_json::to_string(&Ranking::TopAllTime).unwrap();
        assert_eq!(json, "\"top-all-time\"");
    }

    #[test]
    fn stats_absorb_sums_counters() {
        let mut total = RunStats {
            total_fetched: 10,
            analyzed: 2,
            leads_found: 1,
        };
        total.absorb(RunStats {
            total_fetched: 5,
            analyzed: 3,
            leads_found: 2,
        });
        assert_eq!(
            total,
            RunStats {
                total_fetched: 15,
                analyzed: 5,
                leads_found: 3,
            }
        );
    }
}
