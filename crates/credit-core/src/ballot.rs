use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Direction of a single vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Upvote,
    Downvote,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Upvote => "upvote",
            VoteDirection::Downvote => "downvote",
        }
    }

    fn opposite(self) -> Self {
        match self {
            VoteDirection::Upvote => VoteDirection::Downvote,
            VoteDirection::Downvote => VoteDirection::Upvote,
        }
    }
}

impl FromStr for VoteDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(VoteDirection::Upvote),
            "downvote" => Ok(VoteDirection::Downvote),
            _ => Err(CoreError::InvalidInput(format!(
                "invalid vote type '{}', must be \"upvote\" or \"downvote\"",
                s
            ))),
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a toggle did to the voter's standing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChange {
    /// Voter had no vote and now has one
    Cast,
    /// Voter repeated their vote, which removes it
    Withdrawn,
    /// Voter moved from the opposite set in one step
    Switched,
}

/// The two vote sets of an article
///
/// `upvoters` and `downvoters` never share a member. Every constructor and
/// transition keeps them disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BallotSets")]
pub struct Ballot {
    upvoters: BTreeSet<String>,
    downvoters: BTreeSet<String>,
}

/// Wire shape of a ballot before the disjointness check
#[derive(Deserialize)]
struct BallotSets {
    #[serde(default)]
    upvoters: Vec<String>,
    #[serde(default)]
    downvoters: Vec<String>,
}

impl TryFrom<BallotSets> for Ballot {
    type Error = CoreError;

    fn try_from(sets: BallotSets) -> CoreResult<Self> {
        Ballot::from_sets(sets.upvoters, sets.downvoters)
    }
}

impl Ballot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ballot from stored sets, rejecting any voter present in both
    pub fn from_sets(
        upvoters: impl IntoIterator<Item = String>,
        downvoters: impl IntoIterator<Item = String>,
    ) -> CoreResult<Self> {
        let upvoters: BTreeSet<String> = upvoters.into_iter().collect();
        let downvoters: BTreeSet<String> = downvoters.into_iter().collect();

        if let Some(voter) = upvoters.intersection(&downvoters).next() {
            return Err(CoreError::InvalidInput(format!(
                "voter '{}' appears in both upvoters and downvoters",
                voter
            )));
        }

        Ok(Self {
            upvoters,
            downvoters,
        })
    }

    pub fn upvoters(&self) -> &BTreeSet<String> {
        &self.upvoters
    }

    pub fn downvoters(&self) -> &BTreeSet<String> {
        &self.downvoters
    }

    pub fn upvote_count(&self) -> u64 {
        self.upvoters.len() as u64
    }

    pub fn downvote_count(&self) -> u64 {
        self.downvoters.len() as u64
    }

    pub fn total_votes(&self) -> u64 {
        self.upvote_count() + self.downvote_count()
    }

    /// Current vote of a voter, `None` when they have not voted
    pub fn standing(&self, voter_id: &str) -> Option<VoteDirection> {
        if self.upvoters.contains(voter_id) {
            Some(VoteDirection::Upvote)
        } else if self.downvoters.contains(voter_id) {
            Some(VoteDirection::Downvote)
        } else {
            None
        }
    }

    /// Iterate over every vote as `(voter_id, direction)`
    pub fn votes(&self) -> impl Iterator<Item = (&str, VoteDirection)> {
        self.upvoters
            .iter()
            .map(|v| (v.as_str(), VoteDirection::Upvote))
            .chain(
                self.downvoters
                    .iter()
                    .map(|v| (v.as_str(), VoteDirection::Downvote)),
            )
    }

    fn set_mut(&mut self, direction: VoteDirection) -> &mut BTreeSet<String> {
        match direction {
            VoteDirection::Upvote => &mut self.upvoters,
            VoteDirection::Downvote => &mut self.downvoters,
        }
    }
}

/// Apply one vote click to a ballot
///
/// Pure function over `(ballot, voter, direction)`. Repeating the voter's
/// current direction withdraws it; voting the other way moves the voter
/// across in a single step.
///
/// # Examples
///
/// ```
/// use credit_core::ballot::{Ballot, VoteChange, VoteDirection, toggle_vote};
///
/// let ballot = Ballot::new();
/// let (ballot, change) = toggle_vote(&ballot, "alice", VoteDirection::Downvote);
/// assert_eq!(change, VoteChange::Cast);
///
/// let (ballot, change) = toggle_vote(&ballot, "alice", VoteDirection::Upvote);
/// assert_eq!(change, VoteChange::Switched);
/// assert!(ballot.upvoters().contains("alice"));
/// assert!(ballot.downvoters().is_empty());
///
/// let (ballot, change) = toggle_vote(&ballot, "alice", VoteDirection::Upvote);
/// assert_eq!(change, VoteChange::Withdrawn);
/// assert_eq!(ballot.total_votes(), 0);
/// ```
pub fn toggle_vote(ballot: &Ballot, voter_id: &str, direction: VoteDirection) -> (Ballot, VoteChange) {
    let mut next = ballot.clone();

    let change = match ballot.standing(voter_id) {
        Some(current) if current == direction => {
            next.set_mut(direction).remove(voter_id);
            VoteChange::Withdrawn
        }
        Some(_) => {
            next.set_mut(direction.opposite()).remove(voter_id);
            next.set_mut(direction).insert(voter_id.to_string());
            VoteChange::Switched
        }
        None => {
            next.set_mut(direction).insert(voter_id.to_string());
            VoteChange::Cast
        }
    };

    (next, change)
}
