use crate::locks::ArticleLocks;
use credit_scorer::CredibilityScorer;
use sqlx::{Any, Pool};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Application state for Axum dependency injection
///
/// Holds the shared resources handlers need:
/// - Database connection pool
/// - Initial credibility scorer
/// - Semaphore for limiting concurrent scorer calls
/// - Per-article locks that serialize vote updates
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: Pool<Any>,

    /// Scorer used when an article is submitted without a score
    pub scorer: Arc<dyn CredibilityScorer>,

    /// Semaphore for limiting concurrent scorer calls
    pub scorer_semaphore: Arc<Semaphore>,

    /// Vote updates to one article run one at a time
    pub article_locks: Arc<ArticleLocks>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        db_pool: Pool<Any>,
        scorer: Arc<dyn CredibilityScorer>,
        max_concurrent_scorer_calls: usize,
    ) -> Self {
        Self {
            db_pool,
            scorer,
            scorer_semaphore: Arc::new(Semaphore::new(max_concurrent_scorer_calls)),
            article_locks: Arc::new(ArticleLocks::new()),
        }
    }
}
