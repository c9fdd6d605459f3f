//! Paginated search across several terms.
//!
//! Each term is paged until its budget is spent, the API returns an empty
//! page, or the API reports no older results. Results from all terms are
//! concatenated and deduplicated by exact text, first occurrence wins.

use std::collections::HashSet;
use std::future::Future;

use futures::future::try_join_all;

use crate::error::SentimentError;
use crate::types::{SearchPage, SearchQuery, Tweet};

/// A single-page tweet search capability.
pub trait SearchBackend {
    /// Fetch one page of results for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::SearchApi`] if the upstream call fails.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchPage, SentimentError>> + Send;
}

/// Collect up to `count` tweets per term and return them deduplicated by text.
///
/// Every non-empty page shrinks the budget by at least one, and an empty page
/// ends the term, so the loop issues at most `count + 1` calls per term.
///
/// # Errors
///
/// The first [`SentimentError`] from `backend` aborts the whole aggregation.
pub async fn aggregate_tweets<S>(
    backend: &S,
    terms: &[String],
    count: usize,
    lang: &str,
) -> Result<Vec<Tweet>, SentimentError>
where
    S: SearchBackend + Sync,
{
    let mut tweets = Vec::new();

    for term in terms {
        let mut query = SearchQuery::new(term, count, lang);
        let mut pages = 0_usize;

        while query.remaining > 0 {
            let page = backend.search(&query).await?;
            pages += 1;

            if page.tweets.is_empty() {
                tracing::debug!(term = %term, pages, "search returned an empty page");
                break;
            }

            query.advance(&page.tweets);
            tweets.extend(page.tweets);

            if !page.has_more {
                tracing::debug!(term = %term, pages, "search reported no older results");
                break;
            }
        }

        tracing::debug!(
            term = %term,
            pages,
            fetched = count - query.remaining,
            "finished paging search term"
        );
    }

    let total = tweets.len();
    let tweets = dedup_by_text(tweets);
    tracing::info!(
        terms = terms.len(),
        fetched = total,
        unique = tweets.len(),
        "aggregated tweets"
    );

    Ok(tweets)
}

/// Run one page of each query concurrently and flatten the results in
/// query order.
///
/// # Errors
///
/// Fails with the first error any query produces.
pub async fn search_set<S>(
    backend: &S,
    queries: &[SearchQuery],
) -> Result<Vec<Tweet>, SentimentError>
where
    S: SearchBackend + Sync,
{
    let pages = try_join_all(queries.iter().map(|q| backend.search(q))).await?;
    Ok(pages.into_iter().flat_map(|page| page.tweets).collect())
}

/// Drop tweets whose text already appeared earlier in the list.
#[must_use]
pub fn dedup_by_text(mut tweets: Vec<Tweet>) -> Vec<Tweet> {
    let mut seen: HashSet<String> = HashSet::new();
    tweets.retain(|t| seen.insert(t.text.clone()));
    tweets
}

#[cfg(test)]
#[path = "aggregator_test.rs"]
mod tests;
