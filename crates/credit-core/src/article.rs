use serde::{Deserialize, Serialize};

use crate::ballot::{Ballot, VoteChange, VoteDirection, toggle_vote};
use crate::credibility::{recalculate_score, round_score, validate_score};
use crate::error::{CoreError, CoreResult};

/// Vote state and credibility of one article
///
/// `initial_score` is fixed at creation and anchors every recalculation.
/// `current_score` is only ever written by [`Article::apply_vote`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredArticle")]
pub struct Article {
    id: String,
    initial_score: f64,
    current_score: f64,
    #[serde(flatten)]
    ballot: Ballot,
}

/// Wire shape of an article, checked by [`Article::restore`]
#[derive(Deserialize)]
struct StoredArticle {
    id: String,
    initial_score: f64,
    current_score: f64,
    #[serde(flatten)]
    ballot: Ballot,
}

impl TryFrom<StoredArticle> for Article {
    type Error = CoreError;

    fn try_from(stored: StoredArticle) -> CoreResult<Self> {
        Article::restore(
            stored.id,
            stored.initial_score,
            stored.current_score,
            stored.ballot,
        )
    }
}

impl Article {
    /// Create an article with no votes
    ///
    /// The initial score is stored at the same precision as every later
    /// score, so an article whose votes are all withdrawn returns to exactly
    /// this value.
    pub fn new(id: impl Into<String>, initial_score: f64) -> CoreResult<Self> {
        let id = require_id(id.into(), "article id")?;
        let initial_score = round_score(validate_score(initial_score)?);

        Ok(Self {
            id,
            initial_score,
            current_score: initial_score,
            ballot: Ballot::new(),
        })
    }

    /// Rebuild an article from persisted state
    pub fn restore(
        id: impl Into<String>,
        initial_score: f64,
        current_score: f64,
        ballot: Ballot,
    ) -> CoreResult<Self> {
        Ok(Self {
            id: require_id(id.into(), "article id")?,
            initial_score: validate_score(initial_score)?,
            current_score: validate_score(current_score)?,
            ballot,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn initial_score(&self) -> f64 {
        self.initial_score
    }

    pub fn current_score(&self) -> f64 {
        self.current_score
    }

    pub fn ballot(&self) -> &Ballot {
        &self.ballot
    }

    /// Toggle a voter's vote and recalculate the score from the final sets
    ///
    /// Validation happens before anything is touched, so an error leaves the
    /// article exactly as it was.
    pub fn apply_vote(&mut self, voter_id: &str, direction: VoteDirection) -> CoreResult<VoteChange> {
        if voter_id.trim().is_empty() {
            return Err(CoreError::InvalidInput("voter id must not be empty".to_string()));
        }

        let (ballot, change) = toggle_vote(&self.ballot, voter_id, direction);
        let score = recalculate_score(
            self.initial_score,
            ballot.upvote_count(),
            ballot.downvote_count(),
        );

        self.ballot = ballot;
        self.current_score = score;

        Ok(change)
    }
}

/// Apply a vote given as its wire name (`"upvote"` / `"downvote"`)
///
/// # Examples
///
/// ```
/// use credit_core::{Article, VoteChange, apply_vote};
///
/// let mut article = Article::new("a1", 0.5).unwrap();
/// assert_eq!(apply_vote(&mut article, "alice", "upvote").unwrap(), VoteChange::Cast);
/// assert_eq!(article.current_score(), 0.505);
///
/// assert!(apply_vote(&mut article, "alice", "sideways").is_err());
/// assert_eq!(article.current_score(), 0.505);
/// ```
pub fn apply_vote(article: &mut Article, voter_id: &str, direction: &str) -> CoreResult<VoteChange> {
    let direction: VoteDirection = direction.parse()?;
    article.apply_vote(voter_id, direction)
}

fn require_id(id: String, what: &str) -> CoreResult<String> {
    if id.trim().is_empty() {
        Err(CoreError::InvalidInput(format!("{} must not be empty", what)))
    } else {
        Ok(id)
    }
}
