pub mod classifier;
pub mod config;
pub mod factory;
pub mod gemini;
pub mod mock;
pub mod prompt;
pub mod traits;

// Re-export main types for convenience
pub use classifier::ClassifierScorer;
pub use config::ScorerConfig;
pub use factory::create_scorer;
pub use gemini::GeminiScorer;
pub use mock::MockScorer;
pub use traits::{CredibilityAssessment, CredibilityScorer, ScoreRequest, ScorerError};
