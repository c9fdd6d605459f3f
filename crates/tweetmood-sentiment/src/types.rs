use serde::{Deserialize, Serialize};

/// Twitter caps `count` on `search/tweets` at 100 per page.
pub const MAX_PAGE_SIZE: usize = 100;

/// A tweet as returned by the search API. Only the fields we use are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tweet {
    pub id: u64,
    #[serde(alias = "full_text")]
    pub text: String,
}

/// Pagination state for one search term.
///
/// `remaining` shrinks by the number of tweets each page returns and
/// `max_id` moves to one below the oldest id seen so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub remaining: usize,
    pub lang: String,
    pub max_id: Option<u64>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(term: &str, count: usize, lang: &str) -> Self {
        Self {
            term: term.to_string(),
            remaining: count,
            lang: lang.to_string(),
            max_id: None,
        }
    }

    /// The `q` parameter sent upstream. Retweets are excluded.
    #[must_use]
    pub fn query_text(&self) -> String {
        format!("{} -filter:retweets", self.term)
    }

    /// Page size for the next request, capped at [`MAX_PAGE_SIZE`].
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.remaining.min(MAX_PAGE_SIZE)
    }

    /// Record a received page: shrink the budget and move the cursor below
    /// the oldest tweet. An empty page leaves the query untouched.
    pub fn advance(&mut self, page: &[Tweet]) {
        let Some(oldest) = page.iter().map(|t| t.id).min() else {
            return;
        };
        self.remaining = self.remaining.saturating_sub(page.len());
        self.max_id = Some(oldest.saturating_sub(1));
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub tweets: Vec<Tweet>,
    /// `false` once the API reports there is nothing older to fetch.
    pub has_more: bool,
}

/// Sentiment block on an NLU annotation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SentimentScore {
    pub score: f64,
}

/// Emotion scores on an NLU annotation, each in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EmotionScores {
    #[serde(default)]
    pub sadness: f64,
    #[serde(default)]
    pub joy: f64,
    #[serde(default)]
    pub fear: f64,
    #[serde(default)]
    pub disgust: f64,
    #[serde(default)]
    pub anger: f64,
}

/// A keyword or entity annotation returned by the NLU service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Annotation {
    pub text: String,
    #[serde(default)]
    pub relevance: f64,
    pub sentiment: Option<SentimentScore>,
    pub emotion: Option<EmotionScores>,
}

/// The slice of an NLU `analyze` response this service reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NluAnalysis {
    #[serde(default)]
    pub keywords: Vec<Annotation>,
    #[serde(default)]
    pub entities: Vec<Annotation>,
}

/// Flat, client-facing emotion row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordEmotion {
    pub text: String,
    pub sentiment: f64,
    pub sadness: f64,
    pub joy: f64,
    pub fear: f64,
    pub disgust: f64,
    pub anger: f64,
}

/// Body of `GET /api/sentiment`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentPayload {
    pub tweets: Vec<String>,
    pub keywords: Vec<KeywordEmotion>,
}
