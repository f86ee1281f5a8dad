use async_trait::async_trait;
use credit_core::validate_score;
use serde::{Deserialize, Serialize};

/// Share of the raw model score that is kept
pub const MODEL_SCORE_DISCOUNT: f64 = 0.95;

/// Multiplier applied when the headline does not reflect the content
pub const IRRELEVANT_HEADLINE_PENALTY: f64 = 0.5;

/// Article content submitted for scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub headline: String,
    pub description: String,
}

impl ScoreRequest {
    pub fn new(headline: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            description: description.into(),
        }
    }
}

/// What a scorer said about an article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredibilityAssessment {
    /// Score reported by the model (0.0-1.0)
    pub raw_score: f64,
    /// Whether the headline fairly reflects the content
    pub headline_relevant: bool,
    /// Human-readable remarks collected while scoring
    pub notes: Vec<String>,
}

impl CredibilityAssessment {
    /// Create an assessment, rejecting scores outside `[0, 1]`
    pub fn new(raw_score: f64, headline_relevant: bool) -> Result<Self, ScorerError> {
        let raw_score = validate_score(raw_score)
            .map_err(|e| ScorerError::InvalidScore(e.to_string()))?;

        let mut notes = Vec::new();
        if !headline_relevant {
            notes.push("Headline is not relevant to the content, score penalized.".to_string());
        }

        Ok(Self {
            raw_score,
            headline_relevant,
            notes,
        })
    }

    /// Score to seed a new article with
    ///
    /// The raw score is discounted by 5%, halved for an irrelevant headline,
    /// and rounded to 2 digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use credit_scorer::CredibilityAssessment;
    ///
    /// assert_eq!(CredibilityAssessment::new(0.8, true).unwrap().final_score(), 0.76);
    /// assert_eq!(CredibilityAssessment::new(0.8, false).unwrap().final_score(), 0.38);
    /// ```
    pub fn final_score(&self) -> f64 {
        let mut score = self.raw_score * MODEL_SCORE_DISCOUNT;
        if !self.headline_relevant {
            score *= IRRELEVANT_HEADLINE_PENALTY;
        }
        ((score * 100.0).round() / 100.0).clamp(0.0, 1.0)
    }
}

/// Scorer producing the initial credibility of a submitted article
#[async_trait]
pub trait CredibilityScorer: Send + Sync {
    /// Assess an article's credibility
    async fn score(&self, request: &ScoreRequest) -> Result<CredibilityAssessment, ScorerError>;

    /// Get the provider name (e.g., "gemini", "classifier", "mock")
    fn provider_name(&self) -> String;
}

/// Errors that can occur while scoring
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Invalid API key or authentication failed")]
    AuthError,

    #[error("Rate limit exceeded")]
    RateLimitError,

    #[error("Scorer returned an invalid score: {0}")]
    InvalidScore(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_new() {
        let assessment = CredibilityAssessment::new(0.8, true).unwrap();
        assert_eq!(assessment.raw_score, 0.8);
        assert!(assessment.headline_relevant);
        assert!(assessment.notes.is_empty());
    }

    #[test]
    fn test_assessment_irrelevant_headline_note() {
        let assessment = CredibilityAssessment::new(0.8, false).unwrap();
        assert_eq!(assessment.notes.len(), 1);
        assert!(assessment.notes[0].contains("not relevant"));
    }

    #[test]
    fn test_assessment_rejects_out_of_range() {
        assert!(matches!(
            CredibilityAssessment::new(1.2, true),
            Err(ScorerError::InvalidScore(_))
        ));
        assert!(matches!(
            CredibilityAssessment::new(f64::NAN, true),
            Err(ScorerError::InvalidScore(_))
        ));
    }

    #[test]
    fn test_final_score() {
        // 0.8 * 0.95 = 0.76
        assert_eq!(CredibilityAssessment::new(0.8, true).unwrap().final_score(), 0.76);
        // 0.8 * 0.95 * 0.5 = 0.38
        assert_eq!(CredibilityAssessment::new(0.8, false).unwrap().final_score(), 0.38);
        assert_eq!(CredibilityAssessment::new(1.0, true).unwrap().final_score(), 0.95);
        assert_eq!(CredibilityAssessment::new(0.0, false).unwrap().final_score(), 0.0);
    }

    #[test]
    fn test_score_request_new() {
        let request = ScoreRequest::new("Headline", "Body");
        assert_eq!(request.headline, "Headline");
        assert_eq!(request.description, "Body");
    }
}
