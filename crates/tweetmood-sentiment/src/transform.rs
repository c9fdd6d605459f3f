//! Relevance filtering and reshaping of NLU annotations.

use crate::types::{Annotation, KeywordEmotion, NluAnalysis};

/// Minimum relevance an annotation needs to reach the client.
pub const RELEVANCE_THRESHOLD: f64 = 0.5;

/// Keep annotations with an emotion block and relevance at or above
/// [`RELEVANCE_THRESHOLD`], flatten them, keywords first then entities.
#[must_use]
pub fn transform_annotations(analysis: &NluAnalysis) -> Vec<KeywordEmotion> {
    analysis
        .keywords
        .iter()
        .chain(&analysis.entities)
        .filter_map(to_keyword_emotion)
        .collect()
}

/// Flatten one annotation, or `None` if it does not pass the filter.
///
/// A missing sentiment block maps to a neutral `0.0`.
fn to_keyword_emotion(annotation: &Annotation) -> Option<KeywordEmotion> {
    if annotation.relevance < RELEVANCE_THRESHOLD {
        return None;
    }
    let emotion = annotation.emotion?;

    Some(KeywordEmotion {
        text: annotation.text.clone(),
        sentiment: annotation.sentiment.map_or(0.0, |s| s.score),
        sadness: emotion.sadness,
        joy: emotion.joy,
        fear: emotion.fear,
        disgust: emotion.disgust,
        anger: emotion.anger,
    })
}
