//! Per-request orchestration: search, clean, analyze, reshape.

use crate::aggregator::{aggregate_tweets, SearchBackend};
use crate::error::SentimentError;
use crate::nlu::TextAnalyzer;
use crate::preprocess::preprocess_tweets;
use crate::transform::transform_annotations;
use crate::types::{NluAnalysis, SentimentPayload};

/// What to search for on one run.
#[derive(Debug, Clone)]
pub struct SearchPlan<'a> {
    pub terms: &'a [String],
    pub count: usize,
    pub lang: &'a str,
}

/// Run the full pipeline once.
///
/// 1. Page through the search API for every term (deduplicated by text).
/// 2. Strip links and entities from each tweet.
/// 3. Join the cleaned tweets into one newline-separated corpus.
/// 4. Send the corpus to the NLU service in a single call.
/// 5. Filter and flatten the returned annotations.
///
/// The payload's `tweets` are the original, uncleaned texts. A corpus that is
/// blank after cleaning skips the NLU call and yields no keywords.
///
/// # Errors
///
/// Returns [`SentimentError::SearchApi`] or [`SentimentError::AnalysisApi`]
/// from whichever upstream call failed. No partial payload is produced.
pub async fn run_sentiment<S, A>(
    search: &S,
    analyzer: &A,
    plan: &SearchPlan<'_>,
) -> Result<SentimentPayload, SentimentError>
where
    S: SearchBackend + Sync,
    A: TextAnalyzer + Sync,
{
    let tweets = aggregate_tweets(search, plan.terms, plan.count, plan.lang).await?;
    let originals: Vec<String> = tweets.into_iter().map(|t| t.text).collect();

    let corpus = preprocess_tweets(&originals).join("\n");

    let analysis = if corpus.trim().is_empty() {
        tracing::info!("no tweet text left after cleaning; skipping analysis");
        NluAnalysis::default()
    } else {
        analyzer.analyze(&corpus).await?
    };

    let keywords = transform_annotations(&analysis);
    tracing::info!(
        tweets = originals.len(),
        keywords = keywords.len(),
        "sentiment payload ready"
    );

    Ok(SentimentPayload {
        tweets: originals,
        keywords,
    })
}
