use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::prompt::{build_prompt, extract_json};
use crate::traits::{CredibilityAssessment, CredibilityScorer, ScoreRequest, ScorerError};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Gemini `generateContent` scorer
#[derive(Debug, Clone)]
pub struct GeminiScorer {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiScorer {
    /// Create a new Gemini scorer
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_MODEL.to_string(), DEFAULT_BASE_URL.to_string())
    }

    /// Create a Gemini scorer with custom model
    pub fn with_model(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    /// Create a Gemini scorer with custom base URL (for testing)
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelVerdict {
    credibility_score: f64,
    is_headline_relevant: bool,
}

#[async_trait]
impl CredibilityScorer for GeminiScorer {
    async fn score(&self, request: &ScoreRequest) -> Result<CredibilityAssessment, ScorerError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: build_prompt(request),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        debug!("Calling Gemini model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScorerError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                401 | 403 => ScorerError::AuthError,
                429 => ScorerError::RateLimitError,
                _ => ScorerError::ApiError(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ScorerError::ParseError(format!("Failed to parse Gemini response: {}", e)))?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| ScorerError::ParseError("Gemini response missing content".to_string()))?;

        let verdict: ModelVerdict = serde_json::from_str(extract_json(text)).map_err(|e| {
            ScorerError::ParseError(format!("Gemini returned invalid data ({}): {}", e, text))
        })?;

        CredibilityAssessment::new(verdict.credibility_score, verdict.is_headline_relevant)
    }

    fn provider_name(&self) -> String {
        "gemini".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ScoreRequest {
        ScoreRequest::new("City opens new library", "The new library opened on Monday.")
    }

    fn reply(text: &str) -> serde_json::Value {
        json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ] } }
            ]
        })
    }

    async fn scorer_for(server: &MockServer) -> GeminiScorer {
        GeminiScorer::with_base_url("test-key".to_string(), "test-model".to_string(), server.uri())
    }

    #[test]
    fn test_gemini_scorer_new() {
        let scorer = GeminiScorer::new("test-key".to_string());
        assert_eq!(scorer.api_key, "test-key");
        assert_eq!(scorer.model, "gemini-1.5-flash-latest");
        assert_eq!(
            scorer.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_gemini_request_serialization() {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: "prompt".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }

    #[tokio::test]
    async fn test_score_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(
                r#"{"credibilityScore": 0.8, "isHeadlineRelevant": true}"#,
            )))
            .mount(&server)
            .await;

        let assessment = scorer_for(&server).await.score(&request()).await.unwrap();
        assert_eq!(assessment.raw_score, 0.8);
        assert!(assessment.headline_relevant);
        assert_eq!(assessment.final_score(), 0.76);
    }

    #[tokio::test]
    async fn test_score_irrelevant_headline() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(
                r#"{"credibilityScore": 0.8, "isHeadlineRelevant": false}"#,
            )))
            .mount(&server)
            .await;

        let assessment = scorer_for(&server).await.score(&request()).await.unwrap();
        assert_eq!(assessment.final_score(), 0.38);
        assert_eq!(assessment.notes.len(), 1);
    }

    #[tokio::test]
    async fn test_score_out_of_range() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(
                r#"{"credibilityScore": 7, "isHeadlineRelevant": true}"#,
            )))
            .mount(&server)
            .await;

        let result = scorer_for(&server).await.score(&request()).await;
        assert!(matches!(result, Err(ScorerError::InvalidScore(_))));
    }

    #[tokio::test]
    async fn test_score_missing_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let result = scorer_for(&server).await.score(&request()).await;
        assert!(matches!(result, Err(ScorerError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_score_unparseable_verdict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("I cannot decide")))
            .mount(&server)
            .await;

        let result = scorer_for(&server).await.score(&request()).await;
        assert!(matches!(result, Err(ScorerError::ParseError(_))));
    }

    async fn error_for_status(status: u16) -> ScorerError {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
            .mount(&server)
            .await;

        scorer_for(&server).await.score(&request()).await.unwrap_err()
    }

    #[tokio::test]
    async fn test_score_http_errors() {
        assert!(matches!(error_for_status(401).await, ScorerError::AuthError));
        assert!(matches!(error_for_status(403).await, ScorerError::AuthError));
        assert!(matches!(error_for_status(429).await, ScorerError::RateLimitError));
        match error_for_status(500).await {
            ScorerError::ApiError(msg) => assert!(msg.contains("500")),
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }
}
