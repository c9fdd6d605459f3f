use axum::{extract::State, Extension, Json};
use tweetmood_sentiment::{run_sentiment, SearchPlan, SentimentPayload};

use crate::middleware::RequestId;

use super::{map_upstream_error, ApiError, AppState};

/// `GET /api/sentiment`: search, analyze, and return the flattened emotions.
///
/// Takes no query parameters; search terms and count come from config.
pub(super) async fn get_sentiment(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<SentimentPayload>, ApiError> {
    let plan = SearchPlan {
        terms: &state.config.search_terms,
        count: state.config.tweet_count,
        lang: &state.config.search_lang,
    };

    let payload = run_sentiment(state.twitter.as_ref(), state.nlu.as_ref(), &plan)
        .await
        .map_err(|e| map_upstream_error(req_id.0.clone(), &e))?;

    Ok(Json(payload))
}
