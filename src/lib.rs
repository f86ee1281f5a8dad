//! Cred-it: community news sharing with AI-seeded, vote-adjusted credibility scores.
//!
//! This crate re-exports the workspace members so downstream users can depend
//! on a single package.

pub use credit_api;
pub use credit_core;
pub use credit_db;
pub use credit_scorer;
