use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use credit_core::Article;
use credit_db::{
    ArticleRecord,
    articles::{
        count_articles, count_articles_by_uploader, delete_article as db_delete_article,
        insert_article, list_articles as db_list_articles, list_articles_by_uploader,
        require_article, update_article_content,
    },
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{ApiJson, ApiQuery};
use crate::scoring::assess_content;
use crate::state::AppState;

const MAX_PER_PAGE: i64 = 100;

/// Listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_per_page")]
    per_page: i64,
    #[serde(default)]
    uploaded_by: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    data: Vec<T>,
    page: i64,
    per_page: i64,
    total: i64,
    total_pages: i64,
}

/// New article submission
#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub headline: String,
    pub description: String,
    pub uploaded_by: String,
    /// Scored by the configured scorer when absent. Stored rounded to
    /// 4 decimals, the precision of every later score.
    #[serde(default)]
    pub initial_score: Option<f64>,
}

/// Content edit, allowed for the uploader only
#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub headline: String,
    pub description: String,
    pub requested_by: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub requested_by: String,
}

fn require_text(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

fn ensure_owner(record: &ArticleRecord, requested_by: &str) -> ApiResult<()> {
    if record.uploaded_by != requested_by {
        return Err(ApiError::Forbidden(format!(
            "article {} belongs to another uploader",
            record.article.id()
        )));
    }
    Ok(())
}

/// GET /api/posts
///
/// Newest first. `uploaded_by` narrows the listing to one uploader.
pub async fn list_articles(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Json<PaginatedResponse<ArticleRecord>>> {
    if query.page < 1 || query.per_page < 1 || query.per_page > MAX_PER_PAGE {
        return Err(ApiError::BadRequest(format!(
            "page must be >= 1 and per_page between 1 and {}",
            MAX_PER_PAGE
        )));
    }

    let offset = (query.page - 1)
        .checked_mul(query.per_page)
        .ok_or_else(|| ApiError::BadRequest(format!("page {} is out of range", query.page)))?;

    let (data, total) = match query.uploaded_by.as_deref() {
        Some(uploader) => (
            list_articles_by_uploader(&state.db_pool, uploader, query.per_page, offset).await?,
            count_articles_by_uploader(&state.db_pool, uploader).await?,
        ),
        None => (
            db_list_articles(&state.db_pool, query.per_page, offset).await?,
            count_articles(&state.db_pool).await?,
        ),
    };

    let total_pages = (total + query.per_page - 1) / query.per_page;

    Ok(Json(PaginatedResponse {
        data,
        page: query.page,
        per_page: query.per_page,
        total,
        total_pages,
    }))
}

/// POST /api/posts
pub async fn create_article(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateArticleRequest>,
) -> ApiResult<(StatusCode, Json<ArticleRecord>)> {
    require_text("headline", &request.headline)?;
    require_text("description", &request.description)?;
    require_text("uploaded_by", &request.uploaded_by)?;

    let initial_score = match request.initial_score {
        Some(score) => score,
        None => {
            assess_content(&state, &request.headline, &request.description)
                .await?
                .final_score()
        }
    };

    let article = Article::new(Uuid::new_v4().to_string(), initial_score)?;
    let record = insert_article(
        &state.db_pool,
        &article,
        &request.headline,
        &request.description,
        &request.uploaded_by,
    )
    .await?;

    info!(
        "Article {} created by {} with initial score {}",
        record.article.id(),
        record.uploaded_by,
        record.article.initial_score()
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/posts/{id}
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ArticleRecord>> {
    Ok(Json(require_article(&state.db_pool, &id).await?))
}

/// PUT /api/posts/{id}
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateArticleRequest>,
) -> ApiResult<Json<ArticleRecord>> {
    require_text("headline", &request.headline)?;
    require_text("description", &request.description)?;

    let existing = require_article(&state.db_pool, &id).await?;
    ensure_owner(&existing, &request.requested_by)?;

    let record =
        update_article_content(&state.db_pool, &id, &request.headline, &request.description)
            .await?;

    info!("Article {} edited by {}", id, request.requested_by);

    Ok(Json(record))
}

/// DELETE /api/posts/{id}?requested_by=
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<DeleteQuery>,
) -> ApiResult<StatusCode> {
    let _guard = state.article_locks.lock(&id).await;

    let existing = require_article(&state.db_pool, &id).await?;
    ensure_owner(&existing, &query.requested_by)?;

    db_delete_article(&state.db_pool, &id).await?;

    info!("Article {} deleted by {}", id, query.requested_by);

    Ok(StatusCode::NO_CONTENT)
}
