//! Lead export as pretty JSON or CSV.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use leadscout_core::Lead;

/// One column per lead attribute, in this order.
pub const CSV_HEADER: [&str; 9] = [
    "author",
    "title",
    "url",
    "content",
    "source",
    "relevance_score",
    "matched_keywords",
    "date",
    "rationale",
];

const KEYWORD_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// `reddit_leads_<YYYYmmdd_HHMMSS>.<ext>`
#[must_use]
pub fn export_file_name(at: DateTime<Utc>, format: ExportFormat) -> String {
    format!(
        "reddit_leads_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Pretty-printed JSON array carrying every lead attribute.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails.
pub fn leads_to_json(leads: &[Lead]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(leads)
}

/// Header row plus one row per lead. Fields containing a comma, quote, or
/// line break are quoted with inner quotes doubled.
#[must_use]
pub fn leads_to_csv(leads: &[Lead]) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push('\n');

    for lead in leads {
        let score = lead.relevance_score.to_string();
        let keywords = lead.matched_keywords.join(KEYWORD_SEPARATOR);
        let row = [
            lead.author.as_str(),
            lead.title.as_str(),
            lead.url.as_str(),
            lead.content.as_str(),
            lead.source.as_str(),
            score.as_str(),
            keywords.as_str(),
            lead.date.as_str(),
            lead.rationale.as_str(),
        ];
        for (i, field) in row.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&csv_field(field));
        }
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
