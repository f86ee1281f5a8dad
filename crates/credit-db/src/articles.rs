use crate::error::{DbError, DbResult};
use crate::models::{ArticleRaw, ArticleRecord, VoteRaw, format_timestamp};
use chrono::{DateTime, Utc};
use credit_core::Article;
use sqlx::{Any, Pool};

const ARTICLE_COLUMNS: &str =
    "id, headline, description, uploaded_by, initial_score, current_score, created_at, updated_at";

/// Insert a freshly created article (no votes yet)
pub async fn insert_article(
    pool: &Pool<Any>,
    article: &Article,
    headline: &str,
    description: &str,
    uploaded_by: &str,
) -> DbResult<ArticleRecord> {
    let now = Utc::now();
    let now_str = format_timestamp(now);

    sqlx::query(
        "INSERT INTO articles (id, headline, description, uploaded_by, initial_score, current_score, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(article.id())
    .bind(headline)
    .bind(description)
    .bind(uploaded_by)
    .bind(article.initial_score())
    .bind(article.current_score())
    .bind(&now_str)
    .bind(&now_str)
    .execute(pool)
    .await?;

    Ok(ArticleRecord {
        article: article.clone(),
        headline: headline.to_string(),
        description: description.to_string(),
        uploaded_by: uploaded_by.to_string(),
        created_at: now,
        updated_at: now,
    })
}

/// Get an article with its vote sets
pub async fn get_article(pool: &Pool<Any>, id: &str) -> DbResult<Option<ArticleRecord>> {
    let raw = sqlx::query_as::<_, ArticleRaw>(&format!(
        "SELECT {} FROM articles WHERE id = ?",
        ARTICLE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match raw {
        Some(raw) => {
            let votes = load_votes(pool, &raw.id).await?;
            Ok(Some(raw.into_record(votes)?))
        }
        None => Ok(None),
    }
}

/// Get an article, treating a missing row as an error
pub async fn require_article(pool: &Pool<Any>, id: &str) -> DbResult<ArticleRecord> {
    get_article(pool, id)
        .await?
        .ok_or_else(|| DbError::ArticleNotFound(id.to_string()))
}

/// List articles newest first with pagination
pub async fn list_articles(pool: &Pool<Any>, limit: i64, offset: i64) -> DbResult<Vec<ArticleRecord>> {
    let rows = sqlx::query_as::<_, ArticleRaw>(&format!(
        "SELECT {} FROM articles ORDER BY created_at DESC, id LIMIT ? OFFSET ?",
        ARTICLE_COLUMNS
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    with_votes(pool, rows).await
}

/// Count all articles
pub async fn count_articles(pool: &Pool<Any>) -> DbResult<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles")
        .fetch_one(pool)
        .await?;

    Ok(count.0)
}

/// List articles submitted by one uploader, newest first
pub async fn list_articles_by_uploader(
    pool: &Pool<Any>,
    uploaded_by: &str,
    limit: i64,
    offset: i64,
) -> DbResult<Vec<ArticleRecord>> {
    let rows = sqlx::query_as::<_, ArticleRaw>(&format!(
        "SELECT {} FROM articles WHERE uploaded_by = ? ORDER BY created_at DESC, id LIMIT ? OFFSET ?",
        ARTICLE_COLUMNS
    ))
    .bind(uploaded_by)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    with_votes(pool, rows).await
}

/// Count articles submitted by one uploader
pub async fn count_articles_by_uploader(pool: &Pool<Any>, uploaded_by: &str) -> DbResult<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles WHERE uploaded_by = ?")
        .bind(uploaded_by)
        .fetch_one(pool)
        .await?;

    Ok(count.0)
}

/// Replace an article's headline and description
///
/// Scores are left alone: editing does not re-run the scorer.
pub async fn update_article_content(
    pool: &Pool<Any>,
    id: &str,
    headline: &str,
    description: &str,
) -> DbResult<ArticleRecord> {
    let now_str = format_timestamp(Utc::now());

    let result = sqlx::query(
        "UPDATE articles SET headline = ?, description = ?, updated_at = ? WHERE id = ?",
    )
    .bind(headline)
    .bind(description)
    .bind(&now_str)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::ArticleNotFound(id.to_string()));
    }

    require_article(pool, id).await
}

/// Delete an article together with all of its votes
pub async fn delete_article(pool: &Pool<Any>, id: &str) -> DbResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM article_votes WHERE article_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM articles WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::ArticleNotFound(id.to_string()));
    }

    tx.commit().await?;

    Ok(())
}

/// Persist the result of `voter_id`'s vote: the current score and that
/// voter's row
///
/// Other voters' rows are untouched. Runs in one transaction so a reader
/// never sees a score that does not match the stored sets. Returns the new
/// `updated_at`.
pub async fn save_vote_state(
    pool: &Pool<Any>,
    article: &Article,
    voter_id: &str,
) -> DbResult<DateTime<Utc>> {
    let now = Utc::now();
    let now_str = format_timestamp(now);
    let mut tx = pool.begin().await?;

    let result = sqlx::query("UPDATE articles SET current_score = ?, updated_at = ? WHERE id = ?")
        .bind(article.current_score())
        .bind(&now_str)
        .bind(article.id())
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::ArticleNotFound(article.id().to_string()));
    }

    sqlx::query("DELETE FROM article_votes WHERE article_id = ? AND voter_id = ?")
        .bind(article.id())
        .bind(voter_id)
        .execute(&mut *tx)
        .await?;

    if let Some(direction) = article.ballot().standing(voter_id) {
        sqlx::query("INSERT INTO article_votes (article_id, voter_id, direction) VALUES (?, ?, ?)")
            .bind(article.id())
            .bind(voter_id)
            .bind(direction.as_str())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(now)
}

async fn load_votes(pool: &Pool<Any>, article_id: &str) -> DbResult<Vec<VoteRaw>> {
    let votes = sqlx::query_as::<_, VoteRaw>(
        "SELECT voter_id, direction FROM article_votes WHERE article_id = ? ORDER BY voter_id",
    )
    .bind(article_id)
    .fetch_all(pool)
    .await?;

    Ok(votes)
}

async fn with_votes(pool: &Pool<Any>, rows: Vec<ArticleRaw>) -> DbResult<Vec<ArticleRecord>> {
    let mut records = Vec::with_capacity(rows.len());
    for raw in rows {
        let votes = load_votes(pool, &raw.id).await?;
        records.push(raw.into_record(votes)?);
    }
    Ok(records)
}
