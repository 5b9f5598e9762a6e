//! Search profile: which sources to scan, which phrases to look for, and the
//! per-run limits. Loaded from YAML when present, otherwise built-in defaults.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const MAX_PER_SOURCE_CAP: usize = 3000;

const DEFAULT_SOURCES: &[&str] = &[
    "dataanalysis",
    "datascience",
    "businessintelligence",
    "analytics",
    "visualization",
    "PowerBI",
    "tableau",
    "excel",
];

const DEFAULT_KEYWORDS: &[&str] = &[
    "business intelligence",
    "BI dashboard",
    "company needs analytics",
    "business reporting",
    "enterprise analytics",
    "KPI tracking",
    "business metrics",
    "data visualization for business",
    "management reporting",
    "business analysis tool",
    "corporate dashboard",
    "executive reporting",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchProfile {
    pub sources: Vec<String>,
    pub keywords: Vec<String>,
    pub per_source_cap: usize,
    pub min_score: u32,
}

impl Default for SearchProfile {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(ToString::to_string).collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(ToString::to_string).collect(),
            per_source_cap: 50,
            min_score: 7,
        }
    }
}

impl SearchProfile {
    /// Trim entries, drop blanks, strip a leading `r/` from source names, and
    /// collapse case-insensitive duplicates while preserving order.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.sources = dedup_preserving_order(
            self.sources
                .iter()
                .map(|s| {
                    let s = s.trim();
                    s.strip_prefix("r/").unwrap_or(s).trim().to_string()
                })
                .collect(),
        );
        self.keywords = dedup_preserving_order(
            self.keywords
                .iter()
                .map(|k| k.trim().to_string())
                .collect(),
        );
        self
    }

    /// Check list contents and numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::Validation(
                "at least one source is required".to_string(),
            ));
        }
        if self.keywords.is_empty() {
            return Err(ConfigError::Validation(
                "at least one keyword is required".to_string(),
            ));
        }
        if let Some(bad) = self
            .sources
            .iter()
            .find(|s| s.is_empty() || s.contains(char::is_whitespace) || s.contains('/'))
        {
            return Err(ConfigError::Validation(format!(
                "invalid source name '{bad}'"
            )));
        }
        if self.keywords.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "keywords must be non-empty".to_string(),
            ));
        }
        if !(1..=MAX_PER_SOURCE_CAP).contains(&self.per_source_cap) {
            return Err(ConfigError::Validation(format!(
                "per_source_cap {} must be between 1 and {MAX_PER_SOURCE_CAP}",
                self.per_source_cap
            )));
        }
        if !(1..=10).contains(&self.min_score) {
            return Err(ConfigError::Validation(format!(
                "min_score {} must be between 1 and 10",
                self.min_score
            )));
        }
        Ok(())
    }
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(v.to_lowercase()))
        .collect()
}

/// Load, normalize, and validate a search profile from a YAML file.
///
/// Keys missing from the file take their default values.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_search_profile(path: &Path) -> Result<SearchProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profile: SearchProfile = serde_yaml::from_str(&content)?;
    let profile = profile.normalized();
    profile.validate()?;

    Ok(profile)
}

/// Like [`load_search_profile`], but falls back to the built-in defaults when
/// the file does not exist.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or
/// fails validation.
pub fn load_search_profile_or_default(path: &Path) -> Result<SearchProfile, ConfigError> {
    if path.exists() {
        load_search_profile(path)
    } else {
        Ok(SearchProfile::default())
    }
}
