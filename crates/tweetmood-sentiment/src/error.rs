use thiserror::Error;

/// Failures from the two upstream services the pipeline depends on.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// Twitter search or token exchange failed (network, auth, status or payload).
    #[error("search API error: {0}")]
    SearchApi(String),

    /// The NLU analysis call failed (network, auth, status or payload).
    #[error("analysis API error: {0}")]
    AnalysisApi(String),
}

impl SentimentError {
    /// Stable machine-readable code for API error bodies.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::SearchApi(_) => "search_api_error",
            Self::AnalysisApi(_) => "analysis_api_error",
        }
    }
}
