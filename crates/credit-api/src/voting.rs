use axum::{
    Json,
    extract::{Path, State},
};
use credit_core::{CoreError, VoteChange, VoteDirection};
use credit_db::{
    ArticleRecord,
    articles::{require_article, save_vote_state},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiResult;
use crate::extractors::ApiJson;
use crate::state::AppState;

/// Vote request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub vote_type: String,
    pub user_id: String,
}

/// Article after the vote, plus what the click did
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    #[serde(flatten)]
    pub article: ArticleRecord,
    pub change: VoteChange,
}

/// Toggle `voter_id`'s vote on an article and persist the result
///
/// The load, toggle and save run under the article's lock, so concurrent
/// votes on one article are applied one after another and none is lost.
pub async fn cast_vote(
    state: &AppState,
    article_id: &str,
    voter_id: &str,
    vote_type: &str,
) -> ApiResult<(ArticleRecord, VoteChange)> {
    let direction: VoteDirection = vote_type.parse()?;
    if voter_id.trim().is_empty() {
        return Err(CoreError::InvalidInput("voter id must not be empty".to_string()).into());
    }

    let _guard = state.article_locks.lock(article_id).await;

    let mut record = require_article(&state.db_pool, article_id).await?;
    let change = record.article.apply_vote(voter_id, direction)?;
    record.updated_at = save_vote_state(&state.db_pool, &record.article, voter_id).await?;

    info!(
        "Vote {:?} on article {} by {}: {} -> score {}",
        change,
        article_id,
        voter_id,
        direction,
        record.article.current_score()
    );

    Ok((record, change))
}

/// POST /api/posts/{id}/vote
pub async fn vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<VoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let (article, change) = cast_vote(&state, &id, &request.user_id, &request.vote_type).await?;
    Ok(Json(VoteResponse { article, change }))
}
