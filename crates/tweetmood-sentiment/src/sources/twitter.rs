//! Twitter v1.1 standard search client using app-only (bearer) auth.
//!
//! The consumer key/secret pair is exchanged for a bearer token on the first
//! search and the token is cached. A `401` from search drops the cached token
//! so the next call exchanges again.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tokio::sync::RwLock;
use tweetmood_core::TwitterCredentials;

use crate::aggregator::SearchBackend;
use crate::error::SentimentError;
use crate::types::{SearchPage, SearchQuery, Tweet};

const TOKEN_PATH: &str = "oauth2/token";
const SEARCH_PATH: &str = "1.1/search/tweets.json";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token_type: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    statuses: Vec<Tweet>,
    #[serde(default)]
    search_metadata: SearchMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct SearchMetadata {
    next_results: Option<String>,
}

/// Twitter search client. Makes no network calls until the first search.
pub struct TwitterClient {
    client: Client,
    base_url: Url,
    consumer_key: String,
    consumer_secret: String,
    bearer_token: RwLock<Option<String>>,
}

impl TwitterClient {
    /// Build the HTTP client for the API at `credentials.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::SearchApi`] if the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn new(
        credentials: &TwitterCredentials,
        timeout_secs: u64,
    ) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tweetmood/0.1")
            .build()
            .map_err(|e| SentimentError::SearchApi(format!("failed to build HTTP client: {e}")))?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", credentials.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| {
            SentimentError::SearchApi(format!(
                "invalid base URL '{}': {e}",
                credentials.base_url
            ))
        })?;

        Ok(Self {
            client,
            base_url,
            consumer_key: credentials.consumer_key.clone(),
            consumer_secret: credentials.consumer_secret.clone(),
            bearer_token: RwLock::new(None),
        })
    }

    /// Cached bearer token, exchanging the app credentials if none is held.
    async fn bearer_token(&self) -> Result<String, SentimentError> {
        if let Some(token) = self.bearer_token.read().await.clone() {
            return Ok(token);
        }

        let mut slot = self.bearer_token.write().await;
        // Another request may have filled it while we waited for the lock.
        if let Some(token) = slot.clone() {
            return Ok(token);
        }

        let token = Self::fetch_token(
            &self.client,
            &self.base_url,
            &self.consumer_key,
            &self.consumer_secret,
        )
        .await?;
        tracing::info!("obtained Twitter app-only bearer token");
        *slot = Some(token.clone());
        Ok(token)
    }

    async fn fetch_token(
        client: &Client,
        base_url: &Url,
        consumer_key: &str,
        consumer_secret: &str,
    ) -> Result<String, SentimentError> {
        let url = join(base_url, TOKEN_PATH)?;
        let response = client
            .post(url)
            .basic_auth(consumer_key, Some(consumer_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| SentimentError::SearchApi(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SentimentError::SearchApi(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::SearchApi(format!("token parse error: {e}")))?;

        if !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(SentimentError::SearchApi(format!(
                "unexpected token type '{}'",
                token.token_type
            )));
        }

        Ok(token.access_token)
    }

    /// Builds the search URL for the current pagination state.
    fn search_url(&self, query: &SearchQuery) -> Result<Url, SentimentError> {
        let mut url = join(&self.base_url, SEARCH_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &query.query_text());
            pairs.append_pair("count", &query.page_size().to_string());
            pairs.append_pair("lang", &query.lang);
            pairs.append_pair("result_type", "recent");
            if let Some(max_id) = query.max_id {
                pairs.append_pair("max_id", &max_id.to_string());
            }
        }
        Ok(url)
    }
}

impl SearchBackend for TwitterClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SentimentError> {
        let url = self.search_url(query)?;
        tracing::debug!(
            term = %query.term,
            count = query.page_size(),
            max_id = ?query.max_id,
            "searching Twitter"
        );

        let token = self.bearer_token().await?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| SentimentError::SearchApi(format!("search request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Twitter rejected the bearer token; it will be re-fetched");
            *self.bearer_token.write().await = None;
        }
        if !status.is_success() {
            return Err(SentimentError::SearchApi(format!(
                "search for '{}' returned status {status}",
                query.term
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::SearchApi(format!("search response parse error: {e}")))?;

        Ok(SearchPage {
            has_more: body.search_metadata.next_results.is_some(),
            tweets: body.statuses,
        })
    }
}

fn join(base: &Url, path: &str) -> Result<Url, SentimentError> {
    base.join(path)
        .map_err(|e| SentimentError::SearchApi(format!("invalid path '{path}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_client(base_url: &str) -> TwitterClient {
        TwitterClient::new(
            &TwitterCredentials {
                consumer_key: "ck".to_string(),
                consumer_secret: "cs".to_string(),
                base_url: base_url.to_string(),
            },
            5,
        )
        .expect("client construction should not fail")
    }

    #[test]
    fn search_url_omits_cursor_on_first_page() {
        let client = offline_client("https://api.twitter.com/");
        let url = client
            .search_url(&SearchQuery::new("PSU", 200, "en"))
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://api.twitter.com/1.1/search/tweets.json?q=PSU+-filter%3Aretweets&count=100&lang=en&result_type=recent"
        );
    }

    #[test]
    fn search_url_carries_max_id_after_first_page() {
        let client = offline_client("https://api.twitter.com/");
        let mut query = SearchQuery::new("Penn State", 40, "en");
        query.max_id = Some(99);
        let url = client.search_url(&query).expect("url");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("q".to_string(), "Penn State -filter:retweets".to_string())));
        assert!(pairs.contains(&("count".to_string(), "40".to_string())));
        assert!(pairs.contains(&("max_id".to_string(), "99".to_string())));
    }

    #[test]
    fn search_response_without_next_results_is_exhausted() {
        let json = r#"{
            "statuses": [{"id": 1, "id_str": "1", "text": "hi", "user": {"screen_name": "a"}}],
            "search_metadata": {"count": 100, "max_id": 1}
        }"#;
        let body: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.statuses.len(), 1);
        assert!(body.search_metadata.next_results.is_none());
    }
}
