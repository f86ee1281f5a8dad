use std::sync::Arc;

use crate::classifier::ClassifierScorer;
use crate::config::ScorerConfig;
use crate::gemini::GeminiScorer;
use crate::mock::MockScorer;
use crate::traits::{CredibilityScorer, ScorerError};

/// Create a credibility scorer from configuration
pub fn create_scorer(config: &ScorerConfig) -> Result<Arc<dyn CredibilityScorer>, ScorerError> {
    match config {
        ScorerConfig::Gemini {
            api_key,
            model,
            base_url,
        } => {
            if api_key.trim().is_empty() {
                return Err(ScorerError::ConfigError(
                    "Gemini API key is missing".to_string(),
                ));
            }

            let scorer = if let Some(url) = base_url {
                GeminiScorer::with_base_url(api_key.clone(), model.clone(), url.clone())
            } else {
                GeminiScorer::with_model(api_key.clone(), model.clone())
            };
            Ok(Arc::new(scorer))
        }
        ScorerConfig::Classifier { base_url } => {
            if base_url.trim().is_empty() {
                return Err(ScorerError::ConfigError(
                    "Classifier base_url is missing".to_string(),
                ));
            }
            Ok(Arc::new(ClassifierScorer::new(base_url.clone())))
        }
        ScorerConfig::Mock { fixed_score } => {
            let scorer = match fixed_score {
                Some(score) => {
                    credit_core::validate_score(*score)
                        .map_err(|e| ScorerError::ConfigError(e.to_string()))?;
                    MockScorer::with_fixed_score(*score)
                }
                None => MockScorer::new(),
            };
            Ok(Arc::new(scorer))
        }
    }
}
