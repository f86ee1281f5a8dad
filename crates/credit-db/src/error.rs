use credit_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Article not found: id={0}")]
    ArticleNotFound(String),

    #[error("Invalid timestamp in database: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid stored article: {0}")]
    InvalidRecord(#[from] CoreError),
}

pub type DbResult<T> = Result<T, DbError>;
