//! `analyze` command: one pipeline run printed to stdout.

use tweetmood_core::AppConfig;
use tweetmood_sentiment::{run_sentiment, NluClient, SearchPlan, TwitterClient};

/// Run the pipeline once with optional overrides for terms and count.
///
/// # Errors
///
/// Returns an error if either upstream client cannot be built, either
/// upstream call fails, or the payload cannot be serialized.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    terms: Vec<String>,
    count: Option<usize>,
    compact: bool,
) -> anyhow::Result<()> {
    let terms = resolve_terms(terms, &config.search_terms);
    let count = count.unwrap_or(config.tweet_count);

    let twitter = TwitterClient::new(&config.twitter, config.request_timeout_secs)?;
    let nlu = NluClient::new(&config.nlu, config.request_timeout_secs)?;

    tracing::info!(terms = ?terms, count, "running analysis");
    let plan = SearchPlan {
        terms: &terms,
        count,
        lang: &config.search_lang,
    };
    let payload = run_sentiment(&twitter, &nlu, &plan).await?;

    let rendered = if compact {
        serde_json::to_string(&payload)?
    } else {
        serde_json::to_string_pretty(&payload)?
    };
    println!("{rendered}");

    Ok(())
}

/// Command-line terms win; blank entries are ignored.
pub(crate) fn resolve_terms(cli_terms: Vec<String>, configured: &[String]) -> Vec<String> {
    let cli_terms: Vec<String> = cli_terms
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if cli_terms.is_empty() {
        configured.to_vec()
    } else {
        cli_terms
    }
}
