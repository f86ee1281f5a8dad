use async_trait::async_trait;

use crate::traits::{CredibilityAssessment, CredibilityScorer, ScoreRequest, ScorerError};

/// Mock scorer for testing that uses keyword matching
#[derive(Debug, Clone, Default)]
pub struct MockScorer {
    /// Optional score to return for every article
    fixed_score: Option<f64>,
}

impl MockScorer {
    /// Create a new mock scorer with keyword-based scoring
    pub fn new() -> Self {
        Self { fixed_score: None }
    }

    /// Create a mock scorer that always reports the given raw score
    pub fn with_fixed_score(score: f64) -> Self {
        Self {
            fixed_score: Some(score),
        }
    }

    fn score_by_keywords(text: &str) -> f64 {
        let lower = text.to_lowercase();

        if ["you won't believe", "shocking", "miracle", "click here", "secret they"]
            .iter()
            .any(|k| lower.contains(k))
        {
            return 0.2;
        }

        if ["according to", "study", "report", "data", "officials said"]
            .iter()
            .any(|k| lower.contains(k))
        {
            return 0.85;
        }

        0.6
    }

    /// Headline counts as relevant when one of its longer words shows up in the body
    fn headline_matches(request: &ScoreRequest) -> bool {
        let body = request.description.to_lowercase();
        let mut words = request
            .headline
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= 4)
            .peekable();

        if words.peek().is_none() {
            return true;
        }

        words.any(|w| body.contains(&w.to_lowercase()))
    }
}

#[async_trait]
impl CredibilityScorer for MockScorer {
    async fn score(&self, request: &ScoreRequest) -> Result<CredibilityAssessment, ScorerError> {
        if let Some(score) = self.fixed_score {
            return CredibilityAssessment::new(score, true);
        }

        let text = format!("{} {}", request.headline, request.description);
        CredibilityAssessment::new(Self::score_by_keywords(&text), Self::headline_matches(request))
    }

    fn provider_name(&self) -> String {
        "mock".to_string()
    }
}
