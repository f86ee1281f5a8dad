use serde::{Deserialize, Serialize};

/// Scorer provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ScorerConfig {
    Gemini {
        api_key: String,
        #[serde(default = "default_gemini_model")]
        model: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    Classifier {
        base_url: String,
    },
    Mock {
        #[serde(skip_serializing_if = "Option::is_none")]
        fixed_score: Option<f64>,
    },
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

impl Default for ScorerConfig {
    fn default() -> Self {
        ScorerConfig::Mock { fixed_score: None }
    }
}
