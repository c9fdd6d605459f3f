use std::collections::VecDeque;
use std::sync::Mutex;

use super::*;

fn tweet(id: u64, text: &str) -> Tweet {
    Tweet {
        id,
        text: text.to_string(),
    }
}

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

/// Replays scripted pages in order and records every query it receives.
/// Once the script runs out it answers with empty pages.
#[derive(Default)]
struct ScriptedBackend {
    pages: Mutex<VecDeque<Result<SearchPage, SentimentError>>>,
    seen: Mutex<Vec<SearchQuery>>,
}

impl ScriptedBackend {
    fn new(pages: Vec<Result<SearchPage, SentimentError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<SearchQuery> {
        self.seen.lock().unwrap().clone()
    }
}

impl SearchBackend for ScriptedBackend {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SentimentError> {
        self.seen.lock().unwrap().push(query.clone());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SearchPage::default()))
    }
}

/// Serves `page_size()` fresh tweets (at most `per_page`) below the cursor,
/// forever.
struct EndlessBackend {
    per_page: usize,
    calls: Mutex<usize>,
}

impl SearchBackend for EndlessBackend {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SentimentError> {
        *self.calls.lock().unwrap() += 1;
        let top = query.max_id.unwrap_or(1_000_000);
        let n = query.page_size().min(self.per_page) as u64;
        let tweets = (0..n)
            .map(|i| tweet(top - i, &format!("{} #{}", query.term, top - i)))
            .collect();
        Ok(SearchPage {
            tweets,
            has_more: true,
        })
    }
}

fn page(tweets: Vec<Tweet>, has_more: bool) -> Result<SearchPage, SentimentError> {
    Ok(SearchPage { tweets, has_more })
}

#[tokio::test]
async fn results_are_deduplicated_across_terms() {
    let backend = ScriptedBackend::new(vec![
        page(vec![tweet(9, "go lions"), tweet(8, "beaver stadium")], false),
        page(vec![tweet(7, "go lions"), tweet(6, "happy valley")], false),
    ]);

    let tweets = aggregate_tweets(&backend, &terms(&["PSU", "Penn State"]), 10, "en")
        .await
        .expect("aggregate");

    let texts: Vec<&str> = tweets.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["go lions", "beaver stadium", "happy valley"]);
}

#[tokio::test]
async fn empty_pages_terminate_every_term() {
    let backend = ScriptedBackend::default();

    let tweets = aggregate_tweets(&backend, &terms(&["a", "b", "c"]), 200, "en")
        .await
        .expect("aggregate");

    assert!(tweets.is_empty());
    assert_eq!(backend.calls().len(), 3, "one call per term, then stop");
}

#[tokio::test]
async fn stops_once_budget_is_spent() {
    let backend = EndlessBackend {
        per_page: 10,
        calls: Mutex::new(0),
    };

    let tweets = aggregate_tweets(&backend, &terms(&["PSU"]), 25, "en")
        .await
        .expect("aggregate");

    assert_eq!(tweets.len(), 25);
    assert_eq!(*backend.calls.lock().unwrap(), 3);
}

#[tokio::test]
async fn oversized_pages_still_end_the_term() {
    let many: Vec<Tweet> = (0..150).map(|i| tweet(500 - i, &format!("t{i}"))).collect();
    let backend = ScriptedBackend::new(vec![page(many, true)]);

    let tweets = aggregate_tweets(&backend, &terms(&["PSU"]), 100, "en")
        .await
        .expect("aggregate");

    assert_eq!(tweets.len(), 150);
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn cursor_moves_below_oldest_tweet() {
    let backend = ScriptedBackend::new(vec![
        page(vec![tweet(120, "x"), tweet(101, "y")], true),
        page(vec![tweet(90, "z")], false),
    ]);

    aggregate_tweets(&backend, &terms(&["PSU"]), 50, "en")
        .await
        .expect("aggregate");

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].max_id, None);
    assert_eq!(calls[0].remaining, 50);
    assert_eq!(calls[1].max_id, Some(100));
    assert_eq!(calls[1].remaining, 48);
    assert_eq!(calls[1].lang, "en");
}

#[tokio::test]
async fn exhausted_flag_ends_the_term() {
    let backend = ScriptedBackend::new(vec![
        page(vec![tweet(3, "only")], false),
        page(vec![tweet(2, "never fetched")], false),
    ]);

    let tweets = aggregate_tweets(&backend, &terms(&["PSU"]), 50, "en")
        .await
        .expect("aggregate");

    assert_eq!(tweets.len(), 1);
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn search_errors_propagate() {
    let backend = ScriptedBackend::new(vec![
        page(vec![tweet(3, "first")], true),
        Err(SentimentError::SearchApi("boom".to_string())),
    ]);

    let err = aggregate_tweets(&backend, &terms(&["PSU"]), 50, "en")
        .await
        .expect_err("should fail");

    assert!(matches!(err, SentimentError::SearchApi(ref m) if m == "boom"));
}

#[tokio::test]
async fn search_set_flattens_pages_in_order() {
    let backend = ScriptedBackend::new(vec![
        page(vec![tweet(2, "a"), tweet(1, "b")], true),
        page(vec![tweet(4, "c")], true),
    ]);
    let queries = vec![
        SearchQuery::new("PSU", 10, "en"),
        SearchQuery::new("Penn State", 10, "en"),
    ];

    let tweets = search_set(&backend, &queries).await.expect("search set");

    assert_eq!(tweets.len(), 3);
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test]
async fn search_set_propagates_failures() {
    let backend = ScriptedBackend::new(vec![
        page(vec![tweet(2, "a")], true),
        Err(SentimentError::SearchApi("rate limited".to_string())),
    ]);
    let queries = vec![
        SearchQuery::new("PSU", 10, "en"),
        SearchQuery::new("Penn State", 10, "en"),
    ];

    let result = search_set(&backend, &queries).await;
    assert!(matches!(result, Err(SentimentError::SearchApi(_))));
}

#[test]
fn dedup_keeps_first_occurrence() {
    let deduped = dedup_by_text(vec![tweet(3, "a"), tweet(2, "b"), tweet(1, "a")]);
    assert_eq!(deduped, vec![tweet(3, "a"), tweet(2, "b")]);
}
