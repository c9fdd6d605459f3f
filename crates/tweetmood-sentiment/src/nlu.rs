//! Client for the hosted natural-language-understanding `analyze` endpoint.
//!
//! One call per corpus, keyword and entity features with emotion and
//! sentiment enabled. No retries: any failure is returned to the caller.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use tweetmood_core::NluCredentials;

use crate::error::SentimentError;
use crate::types::NluAnalysis;

/// Maximum annotations requested per feature.
const FEATURE_LIMIT: u32 = 50;

/// Something that can annotate a block of text with keyword/entity emotions.
pub trait TextAnalyzer {
    /// Analyze `text` and return its keyword and entity annotations.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::AnalysisApi`] if the upstream call fails.
    fn analyze(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<NluAnalysis, SentimentError>> + Send;
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    features: Features,
}

#[derive(Serialize)]
struct Features {
    keywords: FeatureOptions,
    entities: FeatureOptions,
}

#[derive(Serialize)]
struct FeatureOptions {
    emotion: bool,
    sentiment: bool,
    limit: u32,
}

impl FeatureOptions {
    fn emotions() -> Self {
        Self {
            emotion: true,
            sentiment: true,
            limit: FEATURE_LIMIT,
        }
    }
}

/// HTTP client for the NLU service.
pub struct NluClient {
    client: Client,
    analyze_url: Url,
    api_key: String,
}

impl NluClient {
    /// Creates a client for the service at `credentials.url`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::AnalysisApi`] if the URL is invalid or the
    /// HTTP client cannot be built.
    pub fn new(credentials: &NluCredentials, timeout_secs: u64) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tweetmood/0.1")
            .build()
            .map_err(|e| {
                SentimentError::AnalysisApi(format!("failed to build HTTP client: {e}"))
            })?;

        let analyze_url = build_analyze_url(&credentials.url, &credentials.version)?;

        Ok(Self {
            client,
            analyze_url,
            api_key: credentials.api_key.clone(),
        })
    }
}

impl TextAnalyzer for NluClient {
    async fn analyze(&self, text: &str) -> Result<NluAnalysis, SentimentError> {
        let request = AnalyzeRequest {
            text,
            features: Features {
                keywords: FeatureOptions::emotions(),
                entities: FeatureOptions::emotions(),
            },
        };

        let response = self
            .client
            .post(self.analyze_url.clone())
            .basic_auth("apikey", Some(&self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| SentimentError::AnalysisApi(format!("analyze request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SentimentError::AnalysisApi(format!(
                "analyze returned status {status}: {}",
                body.trim()
            )));
        }

        let analysis: NluAnalysis = response.json().await.map_err(|e| {
            SentimentError::AnalysisApi(format!("analyze response parse error: {e}"))
        })?;

        tracing::debug!(
            keywords = analysis.keywords.len(),
            entities = analysis.entities.len(),
            "NLU analysis complete"
        );

        Ok(analysis)
    }
}

/// `{base}/v1/analyze?version={version}`, tolerant of a trailing slash on `base`.
fn build_analyze_url(base: &str, version: &str) -> Result<Url, SentimentError> {
    let raw = format!("{}/v1/analyze", base.trim_end_matches('/'));
    let mut url = Url::parse(&raw)
        .map_err(|e| SentimentError::AnalysisApi(format!("invalid NLU URL '{base}': {e}")))?;
    url.query_pairs_mut().append_pair("version", version);
    Ok(url)
}
