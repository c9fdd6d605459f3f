//! Tweet text cleanup ahead of NLU analysis.

use std::sync::LazyLock;

use regex::Regex;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("valid link regex"));

/// Clean every tweet, preserving order and count.
#[must_use]
pub fn preprocess_tweets(texts: &[String]) -> Vec<String> {
    texts.iter().map(|t| clean_text(t)).collect()
}

/// Remove links, decode the HTML entities Twitter escapes, and collapse
/// whitespace. Word order is unchanged.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let without_links = remove_links(text);
    decode_entities(&without_links)
}

/// Drop `http(s)://` and `www.` links and normalise spacing.
#[must_use]
pub fn remove_links(text: &str) -> String {
    LINK_RE
        .replace_all(text, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// `&amp;` last so "&amp;lt;" decodes to "&lt;" rather than "<".
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
