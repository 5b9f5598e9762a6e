//! Wire types for the Reddit OAuth and listing endpoints.

use chrono::DateTime;
use serde::Deserialize;

use leadscout_core::Item;

const PERMALINK_HOST: &str = "https://reddit.com";

/// Reddit OAuth token response.
///
/// Bad credentials come back as HTTP 200 with `error` set and no token.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: Option<String>,
    /// Lifetime in seconds. Password-grant tokens report 3600.
    pub(crate) expires_in: Option<u64>,
    pub(crate) error: Option<String>,
}

/// Listing wrapper returned by `/r/{subreddit}/{new,top,hot}`.
#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

/// Children are kept as raw JSON so one malformed post does not sink the page.
#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<serde_json::Value>,
    pub after: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Post {
    pub data: PostData,
}

#[derive(Debug, Deserialize)]
pub struct PostData {
    pub id: String,
    pub title: String,
    pub selftext: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u64,
    pub created_utc: f64,
    pub permalink: String,
}

/// Convert one raw listing child into an [`Item`].
///
/// Returns `None` when a required field is missing or unusable.
pub(crate) fn child_to_item(child: serde_json::Value, source: &str) -> Option<Item> {
    let post: Post = serde_json::from_value(child).ok()?;
    post_to_item(post.data, source)
}

#[allow(clippy::cast_possible_truncation)]
fn post_to_item(post: PostData, source: &str) -> Option<Item> {
    let id = post.id.trim();
    let title = post.title.trim();
    if id.is_empty() || title.is_empty() || !post.created_utc.is_finite() {
        return None;
    }
    let created_at = DateTime::from_timestamp(post.created_utc as i64, 0)?;

    let body = post
        .selftext
        .filter(|body| !is_blank_or_removed(body));
    let author = post
        .author
        .filter(|author| !is_blank_or_removed(author));

    Some(Item {
        id: id.to_string(),
        title: post.title,
        body,
        author,
        source: source.to_string(),
        popularity: post.score,
        comment_count: post.num_comments,
        created_at,
        url: format!("{PERMALINK_HOST}{}", post.permalink),
    })
}

fn is_blank_or_removed(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == "[deleted]" || value == "[removed]"
}
