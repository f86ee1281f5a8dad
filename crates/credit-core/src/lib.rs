pub mod article;
pub mod ballot;
pub mod config;
pub mod credibility;
pub mod error;

// Re-export commonly used types
pub use article::{Article, apply_vote};
pub use ballot::{Ballot, VoteChange, VoteDirection, toggle_vote};
pub use config::ServerConfig;
pub use credibility::{N_BASE, SCORE_DECIMALS, recalculate_score, round_score, validate_score};
pub use error::{CoreError, CoreResult};
