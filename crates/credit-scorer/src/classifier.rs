use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::traits::{CredibilityAssessment, CredibilityScorer, ScoreRequest, ScorerError};

/// Scorer backed by the headline classification service
///
/// The service only sees the headline (`POST /predict/` with `{"text": ...}`)
/// and cannot judge headline relevance, so every headline counts as relevant.
#[derive(Debug, Clone)]
pub struct ClassifierScorer {
    client: Client,
    base_url: String,
}

impl ClassifierScorer {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/predict/", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

/// The service answers 200 with either a score or an `error` field
#[derive(Debug, Deserialize)]
struct PredictResponse {
    credibility_score: Option<f64>,
    error: Option<String>,
}

#[async_trait]
impl CredibilityScorer for ClassifierScorer {
    async fn score(&self, request: &ScoreRequest) -> Result<CredibilityAssessment, ScorerError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&PredictRequest {
                text: request.headline.trim(),
            })
            .send()
            .await
            .map_err(|e| ScorerError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScorerError::ApiError(format!("HTTP {}: {}", status, error_text)));
        }

        let predict: PredictResponse = response.json().await.map_err(|e| {
            ScorerError::ParseError(format!("Failed to parse classifier response: {}", e))
        })?;

        match (predict.credibility_score, predict.error) {
            (_, Some(error)) => Err(ScorerError::ApiError(error)),
            (Some(score), None) => CredibilityAssessment::new(score, true),
            (None, None) => Err(ScorerError::ParseError(
                "Classifier response missing credibility_score".to_string(),
            )),
        }
    }

    fn provider_name(&self) -> String {
        "classifier".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ScoreRequest {
        ScoreRequest::new(" Scientists confirm water is wet ", "Long article body")
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let scorer = ClassifierScorer::new("http://127.0.0.1:8000/".to_string());
        assert_eq!(scorer.endpoint(), "http://127.0.0.1:8000/predict/");
    }

    #[tokio::test]
    async fn test_score_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict/"))
            .and(body_json(json!({ "text": "Scientists confirm water is wet" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "headline": "Scientists confirm water is wet",
                "credibility_score": 0.91
            })))
            .mount(&server)
            .await;

        let scorer = ClassifierScorer::new(server.uri());
        let assessment = scorer.score(&request()).await.unwrap();

        assert_eq!(assessment.raw_score, 0.91);
        assert!(assessment.headline_relevant);
    }

    #[tokio::test]
    async fn test_score_service_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "error": "model not loaded" })),
            )
            .mount(&server)
            .await;

        let scorer = ClassifierScorer::new(server.uri());
        match scorer.score(&request()).await {
            Err(ScorerError::ApiError(msg)) => assert_eq!(msg, "model not loaded"),
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_score_missing_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "headline": "x" })))
            .mount(&server)
            .await;

        let scorer = ClassifierScorer::new(server.uri());
        assert!(matches!(
            scorer.score(&request()).await,
            Err(ScorerError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_score_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let scorer = ClassifierScorer::new(server.uri());
        assert!(matches!(
            scorer.score(&request()).await,
            Err(ScorerError::ApiError(_))
        ));
    }
}
