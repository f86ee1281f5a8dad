use chrono::{DateTime, SecondsFormat, Utc};
use credit_core::{Article, Ballot, VoteDirection};
use serde::Serialize;
use sqlx::FromRow;

use crate::error::{DbError, DbResult};

/// Article as stored: the scored vote ledger plus its content
#[derive(Debug, Clone, Serialize)]
pub struct ArticleRecord {
    #[serde(flatten)]
    pub article: Article,
    pub headline: String,
    pub description: String,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw article row (timestamps as RFC 3339 strings)
#[derive(Debug, Clone, FromRow)]
pub(crate) struct ArticleRaw {
    pub id: String,
    pub headline: String,
    pub description: String,
    pub uploaded_by: String,
    pub initial_score: f64,
    pub current_score: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Raw vote row
#[derive(Debug, Clone, FromRow)]
pub(crate) struct VoteRaw {
    pub voter_id: String,
    pub direction: String,
}

impl ArticleRaw {
    /// Combine the article row with its vote rows
    pub(crate) fn into_record(self, votes: Vec<VoteRaw>) -> DbResult<ArticleRecord> {
        let mut upvoters = Vec::new();
        let mut downvoters = Vec::new();

        for vote in votes {
            match vote.direction.parse::<VoteDirection>()? {
                VoteDirection::Upvote => upvoters.push(vote.voter_id),
                VoteDirection::Downvote => downvoters.push(vote.voter_id),
            }
        }

        let ballot = Ballot::from_sets(upvoters, downvoters)?;
        let article = Article::restore(self.id, self.initial_score, self.current_score, ballot)?;

        Ok(ArticleRecord {
            article,
            headline: self.headline,
            description: self.description,
            uploaded_by: self.uploaded_by,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Fixed-width UTC timestamps so that text ordering matches time ordering
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidTimestamp(format!("{}: {}", value, e)))
}
