//! Tweet emotion pipeline for tweetmood.
//!
//! Pages tweets for a set of search terms from the Twitter search API,
//! deduplicates and cleans them, sends the joined corpus to a hosted NLU
//! service, and flattens the relevant keyword/entity emotions for clients.

pub mod aggregator;
pub mod error;
pub mod nlu;
pub mod pipeline;
pub mod preprocess;
pub mod transform;
pub mod types;

mod sources;

pub use aggregator::{aggregate_tweets, dedup_by_text, search_set, SearchBackend};
pub use error::SentimentError;
pub use nlu::{NluClient, TextAnalyzer};
pub use pipeline::{run_sentiment, SearchPlan};
pub use preprocess::{clean_text, preprocess_tweets, remove_links};
pub use sources::TwitterClient;
pub use transform::{transform_annotations, RELEVANCE_THRESHOLD};
pub use types::{
    Annotation, EmotionScores, KeywordEmotion, NluAnalysis, SearchPage, SearchQuery,
    SentimentPayload, SentimentScore, Tweet,
};
