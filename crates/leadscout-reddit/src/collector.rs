//! Multi-ranking collection for one source.
//!
//! A single listing query tops out at `query_max` posts. To gather more, the
//! collector walks the rankings in [`Ranking::COLLECTION_ORDER`]: recent
//! first, then all-time top, then trending, keeping only identifiers it has
//! not seen yet. A ranking that fails contributes nothing and collection
//! carries on with the next one.

use std::collections::HashSet;
use std::future::Future;

use leadscout_core::{Item, ProgressSink, Ranking};

use crate::error::RedditError;

/// A read-only API that serves ranked item listings for a named source.
pub trait ContentSource {
    /// Fetch up to `limit` items for `source` under `ranking`, in the API's
    /// native order.
    fn fetch_ranked(
        &self,
        source: &str,
        ranking: Ranking,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Item>, RedditError>>;
}

/// Collect up to `cap` unique items from `source`.
///
/// The recent ranking is always queried for `min(cap, query_max)` items. The
/// other rankings are only consulted when `cap` exceeds `query_max` and the
/// accumulated set is still short. Each stage asks for at most
/// `min(cap - accumulated, query_max)` items.
///
/// Never fails: stage errors become warnings on `progress`.
pub async fn collect<S, P>(
    api: &S,
    source: &str,
    cap: usize,
    query_max: usize,
    progress: &mut P,
) -> Vec<Item>
where
    S: ContentSource,
    P: ProgressSink + ?Sized,
{
    let mut items: Vec<Item> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    if cap == 0 || query_max == 0 {
        return items;
    }

    for ranking in Ranking::COLLECTION_ORDER {
        if ranking != Ranking::New && (cap <= query_max || items.len() >= cap) {
            break;
        }

        let want = (cap - items.len()).min(query_max);
        match api.fetch_ranked(source, ranking, want).await {
            Ok(batch) => {
                let fetched = batch.len();
                let added = extend_unique(&mut items, &mut seen, batch);
                tracing::info!(
                    source,
                    %ranking,
                    requested = want,
                    fetched,
                    added,
                    "collected ranking"
                );
                progress.status(stage_message(ranking, source, added));
            }
            Err(e) => {
                progress.warning(format!(
                    "Error fetching {} posts from r/{source}: {e}",
                    ranking.listing_path()
                ));
            }
        }
    }

    items.truncate(cap);
    items
}

/// Append items whose identifier is new; returns how many were added.
fn extend_unique(items: &mut Vec<Item>, seen: &mut HashSet<String>, batch: Vec<Item>) -> usize {
    let before = items.len();
    items.extend(batch.into_iter().filter(|item| seen.insert(item.id.clone())));
    items.len() - before
}

fn stage_message(ranking: Ranking, source: &str, added: usize) -> String {
    match ranking {
        Ranking::New => format!("Fetched {added} new posts from r/{source}"),
        other => format!(
            "Fetched {added} additional {} posts from r/{source}",
            other.listing_path()
        ),
    }
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
