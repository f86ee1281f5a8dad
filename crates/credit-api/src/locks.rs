use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<String, Arc<Mutex<()>>>;

/// Per-article mutual exclusion for read-modify-write of vote state
///
/// Updates to different articles never wait on each other. Entries are
/// dropped once no task holds or waits on them.
#[derive(Debug, Default)]
pub struct ArticleLocks {
    locks: Arc<LockMap>,
}

/// Held while an article's votes are being changed
#[derive(Debug)]
pub struct ArticleLockGuard {
    article_id: String,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
}

impl ArticleLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other task holds the lock for `article_id`
    pub async fn lock(&self, article_id: &str) -> ArticleLockGuard {
        let mutex = self
            .locks
            .entry(article_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        // Built before waiting so a cancelled wait still cleans up the entry
        let mut lease = ArticleLockGuard {
            article_id: article_id.to_string(),
            guard: None,
            locks: Arc::clone(&self.locks),
        };

        lease.guard = Some(mutex.lock_owned().await);
        lease
    }

    /// Number of articles with a live lock entry
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for ArticleLockGuard {
    fn drop(&mut self) {
        self.guard.take();
        // Only the map's own handle left: nobody is waiting.
        self.locks
            .remove_if(&self.article_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_lock_released_entry_removed() {
        let locks = ArticleLocks::new();
        {
            let _guard = locks.lock("a1").await;
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_distinct_articles_do_not_block() {
        let locks = ArticleLocks::new();
        let _a = locks.lock("a1").await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.lock("a2")).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_wait_removes_entry() {
        let locks = Arc::new(ArticleLocks::new());
        let first = locks.lock("a1").await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.lock("a1").await;
            })
        };

        // Let the waiter queue up, then hand it the lock and cancel it
        tokio::task::yield_now().await;
        drop(first);
        waiter.abort();
        let _ = waiter.await;

        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_same_article_waits() {
        let locks = Arc::new(ArticleLocks::new());
        let first = locks.lock("a1").await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.lock("a1").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(first);
        waiter.await.unwrap();
        assert!(locks.is_empty());
    }
}
