//! `search` command: one page per term, no text analysis.

use tweetmood_core::AppConfig;
use tweetmood_sentiment::{search_set, SearchQuery, TwitterClient};

use crate::analyze::resolve_terms;

/// Fetch a single page for each term concurrently and print the tweet texts
/// as a JSON array, in term order.
///
/// # Errors
///
/// Returns an error if the search client cannot be built, any search fails,
/// or the output cannot be serialized.
pub(crate) async fn run_search(
    config: &AppConfig,
    terms: Vec<String>,
    count: Option<usize>,
) -> anyhow::Result<()> {
    let terms = resolve_terms(terms, &config.search_terms);
    let queries = build_queries(&terms, count.unwrap_or(config.tweet_count), &config.search_lang);

    let twitter = TwitterClient::new(&config.twitter, config.request_timeout_secs)?;

    tracing::info!(terms = ?terms, "running single-page search");
    let tweets = search_set(&twitter, &queries).await?;
    let texts: Vec<String> = tweets.into_iter().map(|t| t.text).collect();

    println!("{}", serde_json::to_string_pretty(&texts)?);
    Ok(())
}

fn build_queries(terms: &[String], count: usize, lang: &str) -> Vec<SearchQuery> {
    terms
        .iter()
        .map(|term| SearchQuery::new(term, count, lang))
        .collect()
}
